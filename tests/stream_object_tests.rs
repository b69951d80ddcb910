use async_trait::async_trait;
use objstream::core::{
    GenerateObjectCallOptions, LanguageModel, LanguageModelCallOptions, LanguageModelResponse,
    LanguageModelStreamResponse, ObjectSchema, SchemaType, stream_object,
};
use objstream::{Error, Result};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize, PartialEq)]
struct Point {
    x: i64,
    y: i64,
}

/// A model that streams a fixed script of snapshots.
#[derive(Debug)]
struct StreamingModel {
    script: Vec<Result<Value>>,
}

impl StreamingModel {
    fn playing(script: Vec<Result<Value>>) -> Self {
        StreamingModel { script }
    }
}

#[async_trait]
impl LanguageModel for StreamingModel {
    async fn generate(&mut self, _options: LanguageModelCallOptions) -> Result<LanguageModelResponse> {
        unimplemented!("not used by these tests")
    }

    async fn generate_stream(
        &mut self,
        _options: LanguageModelCallOptions,
    ) -> Result<LanguageModelStreamResponse> {
        let script = std::mem::take(&mut self.script);
        Ok(LanguageModelStreamResponse {
            stream: Box::pin(futures::stream::iter(script)),
            model: Some("scripted".to_string()),
        })
    }
}

/// A model that dies before producing anything.
#[derive(Debug)]
struct PanickingModel;

#[async_trait]
impl LanguageModel for PanickingModel {
    async fn generate(&mut self, _options: LanguageModelCallOptions) -> Result<LanguageModelResponse> {
        unimplemented!("not used by these tests")
    }

    async fn generate_stream(
        &mut self,
        _options: LanguageModelCallOptions,
    ) -> Result<LanguageModelStreamResponse> {
        panic!("scripted panic");
    }
}

fn point_options() -> GenerateObjectCallOptions {
    GenerateObjectCallOptions::builder()
        .prompt(Some("Where is the flag?".to_string()))
        .schema(
            ObjectSchema::object([
                ("x", SchemaType::integer()),
                ("y", SchemaType::integer()),
            ])
            .name("point"),
        )
        .build()
        .expect("Failed to build options")
}

#[tokio::test]
async fn test_snapshots_arrive_in_order_and_the_final_object_decodes() {
    let script = [json!({}), json!({"x": 1}), json!({"x": 1, "y": 2})];
    let model = StreamingModel::playing(script.iter().cloned().map(Ok).collect());
    let response = stream_object(model, point_options());

    let mut live = response.partial_object_stream();
    let mut seen = Vec::new();
    while let Some(item) = live.recv().await {
        seen.push(item.expect("unexpected stream failure"));
    }

    // A slow reader may coalesce snapshots, but never reorders or repeats
    // them, and always ends on the final one.
    let mut cursor = 0;
    for snapshot in &seen {
        let advance = script[cursor..]
            .iter()
            .position(|s| s == snapshot)
            .expect("snapshot out of script order");
        cursor += advance + 1;
    }
    assert_eq!(seen.last(), Some(&script[script.len() - 1]));

    let point: Point = response.object().await.expect("Failed to get final object");
    assert_eq!(point, Point { x: 1, y: 2 });
}

#[tokio::test]
async fn test_a_mid_stream_error_reaches_every_reader() {
    let model = StreamingModel::playing(vec![
        Ok(json!({"x": 1})),
        Err(Error::ProviderError("upstream died".to_string())),
    ]);
    let response = stream_object(model, point_options());

    let mut reader = response.partial_object_stream();
    let mut failures = 0;
    while let Some(item) = reader.recv().await {
        if let Err(error) = item {
            match error {
                Error::ProviderError(_) => failures += 1,
                other => panic!("Expected ProviderError, got {other:?}"),
            }
        }
    }
    assert_eq!(failures, 1);

    // The typed accessor reports the same failure.
    let result = response.object::<Point>().await;
    assert!(result.is_err());
    match result.unwrap_err() {
        Error::ProviderError(_) => {}
        other => panic!("Expected ProviderError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_a_panicking_producer_marks_the_stream_aborted() {
    let response = stream_object(PanickingModel, point_options());

    let mut reader = response.partial_object_stream();
    match reader.recv().await {
        Some(Err(Error::StreamAborted(_))) => {}
        other => panic!("Expected StreamAborted, got {other:?}"),
    }
    assert!(reader.recv().await.is_none());
}

#[tokio::test]
async fn test_the_response_tracks_completion() {
    let script = vec![Ok(json!({"x": 5, "y": 6}))];
    let response = stream_object(StreamingModel::playing(script), point_options());

    let point: Point = response.object().await.expect("Failed to get final object");
    assert_eq!(point, Point { x: 5, y: 6 });
    assert!(!response.is_streaming());
    assert_eq!(response.latest(), Some(json!({"x": 5, "y": 6})));
}

#[tokio::test]
async fn test_a_late_subscription_still_sees_the_outcome() {
    let script = vec![Ok(json!({"x": 7, "y": 8}))];
    let response = stream_object(StreamingModel::playing(script), point_options());
    response
        .object::<Point>()
        .await
        .expect("Failed to get final object");

    // Subscribing after completion drains the held value, then ends.
    let mut late = response.partial_object_stream();
    assert_eq!(late.recv().await, Some(Ok(json!({"x": 7, "y": 8}))));
    assert_eq!(late.recv().await, None);
}

#[tokio::test]
async fn test_an_empty_stream_yields_no_object() {
    let response = stream_object(StreamingModel::playing(Vec::new()), point_options());

    let result = response.object::<Point>().await;
    assert!(result.is_err());
    match result.unwrap_err() {
        Error::NoObjectGenerated(_) => {}
        other => panic!("Expected NoObjectGenerated error, got {other:?}"),
    }
}
