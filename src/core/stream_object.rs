//! Provides the primary user-facing function for streaming object generation.
//!
//! This module contains the `stream_object` function, which starts a
//! generation in a detached task and hands back a [`StreamObjectResponse`]
//! immediately. Consumers follow the object as it grows through
//! partial-object snapshots and can decode the final typed value once the
//! stream settles.

use crate::{
    core::{
        language_model::LanguageModel,
        streamable::{StreamableReader, StreamableValue, StreamableWriter},
        types::{GenerateObjectCallOptions, LanguageModelCallOptions},
        utils::resolve_messages,
    },
    error::{Error, Result},
};
use futures::{FutureExt, StreamExt};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::panic::AssertUnwindSafe;

// ============================================================================
// Section: entry point
// ============================================================================

/// Generates a typed object using a specified language model, publishing
/// partial snapshots of it while it is being produced.
///
/// Unlike `generate_object` this function is not async: it spawns the
/// producing task onto the ambient Tokio runtime and returns at once, so
/// consumption starts while generation is still in flight. The generation
/// runs to its natural end regardless of how many snapshots are observed;
/// dropping the response or abandoning a traversal never interrupts the
/// producer.
///
/// # Arguments
///
/// * `model` - A language model that implements the `LanguageModel` trait.
///
/// * `options` - A `GenerateObjectCallOptions` struct containing the schema,
///   prompt, and other parameters for the request.
pub fn stream_object<M>(mut model: M, options: GenerateObjectCallOptions) -> StreamObjectResponse
where
    M: LanguageModel + 'static,
{
    let (writer, value) = StreamableValue::new();

    tokio::spawn(async move {
        // A detached task's outcome must never be lost: every exit path,
        // including a panic, lands the cell in a terminal state.
        match AssertUnwindSafe(drive(&mut model, options, &writer))
            .catch_unwind()
            .await
        {
            Ok(Ok(())) => writer.done(),
            Ok(Err(error)) => {
                log::warn!("structured object stream failed: {error}");
                writer.fail(error);
            }
            Err(_) => {
                log::warn!("structured object stream panicked");
                writer.fail(Error::StreamAborted(
                    "the producing task panicked".to_string(),
                ));
            }
        }
    });

    StreamObjectResponse { value }
}

/// Drives the provider's snapshot stream into the cell.
async fn drive<M: LanguageModel>(
    model: &mut M,
    options: GenerateObjectCallOptions,
    writer: &StreamableWriter<Value>,
) -> Result<()> {
    let (system, messages) = resolve_messages(options.system, options.prompt, options.messages);

    let response = model
        .generate_stream(
            LanguageModelCallOptions::builder()
                .system(system)
                .messages(Some(messages))
                .max_tokens(options.max_tokens)
                .temperature(options.temperature)
                .top_p(options.top_p)
                .top_k(options.top_k)
                .stop(options.stop)
                .schema(options.schema.to_value())
                .schema_name(options.schema.name.clone())
                .schema_description(options.schema.description.clone())
                .build()?,
        )
        .await?;

    if let Some(model_name) = &response.model {
        log::debug!("streaming structured object from {model_name}");
    }

    let mut stream = response.stream;
    while let Some(snapshot) = stream.next().await {
        writer.update(snapshot?);
    }

    Ok(())
}

// ============================================================================
// Section: response
// ============================================================================

/// Handle onto an in-flight `stream_object` generation.
///
/// The handle is the read side of the underlying cell: it can open any
/// number of independent snapshot traversals, peek at the most recent
/// snapshot, and decode the final object. It is cheap to clone.
#[derive(Debug, Clone)]
pub struct StreamObjectResponse {
    value: StreamableValue<Value>,
}

impl StreamObjectResponse {
    /// Opens a traversal over the partial-object snapshots.
    ///
    /// Every call starts an independent cursor: a traversal opened late
    /// begins at the most recent snapshot instead of replaying history.
    pub fn partial_object_stream(&self) -> StreamableReader<Value> {
        self.value.subscribe()
    }

    /// Returns the most recent snapshot, if any was produced yet.
    pub fn latest(&self) -> Option<Value> {
        self.value.latest()
    }

    /// Whether the generation is still producing snapshots.
    pub fn is_streaming(&self) -> bool {
        !self.value.is_closed()
    }

    /// Waits for the generation to settle and decodes the final object.
    ///
    /// # Errors
    ///
    /// Returns the stream's error if the generation failed, or
    /// `Error::NoObjectGenerated` when the stream ended without a decodable
    /// final value.
    pub async fn object<T: DeserializeOwned>(&self) -> Result<T> {
        let mut reader = self.value.subscribe();
        let mut last = None;
        while let Some(snapshot) = reader.recv().await {
            last = Some(snapshot?);
        }

        match last {
            Some(value) => serde_json::from_value(value).map_err(|e| {
                Error::NoObjectGenerated(format!("final object did not match the schema: {e}"))
            }),
            None => Err(Error::NoObjectGenerated(
                "the stream ended without producing a value".to_string(),
            )),
        }
    }
}
