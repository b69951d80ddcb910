//! This module provides the OpenAI provider, which implements the `LanguageModel`
//! trait for structured generation against the OpenAI Responses API.

pub mod conversions;
pub mod settings;
use async_openai::types::responses::{
    Content, CreateResponse, OutputContent, Response, ResponseEvent, ResponseStream,
};
use async_openai::{Client, config::OpenAIConfig};
use futures::{StreamExt, stream::once};
use serde_json::Value;

use crate::providers::openai::settings::{OpenAIProviderSettings, OpenAIProviderSettingsBuilder};
use crate::{
    core::{
        language_model::LanguageModel,
        partial_json::complete_partial_json,
        types::{LanguageModelCallOptions, LanguageModelResponse, LanguageModelStreamResponse},
    },
    error::{Error, Result},
};
use async_trait::async_trait;
use serde::Serialize;

/// The OpenAI provider.
#[derive(Debug, Serialize)]
pub struct OpenAI {
    #[serde(skip)]
    client: Client<OpenAIConfig>,
    settings: OpenAIProviderSettings,
}

impl OpenAI {
    /// Creates a new `OpenAI` provider with the given settings.
    pub fn new(model_name: impl Into<String>) -> Self {
        OpenAIProviderSettingsBuilder::default()
            .model_name(model_name.into())
            .build()
            .expect("Failed to build OpenAIProviderSettings")
    }

    /// OpenAI provider setting builder.
    pub fn builder() -> OpenAIProviderSettingsBuilder {
        OpenAIProviderSettings::builder()
    }
}

#[async_trait]
impl LanguageModel for OpenAI {
    async fn generate(
        &mut self,
        options: LanguageModelCallOptions,
    ) -> Result<LanguageModelResponse> {
        let mut request: CreateResponse = options.into();
        request.model = self.settings.model_name.to_string();

        let response: Response = self.client.responses().create(request).await?;
        let text = response
            .output
            .iter()
            .find_map(|out| match out {
                OutputContent::Message(msg) => msg.content.iter().find_map(|c| match c {
                    Content::OutputText(t) => Some(t.text.to_string()),
                    _ => None,
                }),
                _ => None,
            })
            .unwrap_or_default();

        Ok(LanguageModelResponse {
            model: Some(response.model.to_string()),
            text,
            stop_reason: None,
        })
    }

    async fn generate_stream(
        &mut self,
        options: LanguageModelCallOptions,
    ) -> Result<LanguageModelStreamResponse> {
        let mut request: CreateResponse = options.into();
        request.model = self.settings.model_name.to_string();
        request.stream = Some(true);

        let openai_stream: ResponseStream = self.client.responses().create_stream(request).await?;

        let (first, rest) = openai_stream.into_future().await;

        // get the model name from the first response
        let model = match &first {
            Some(Ok(ResponseEvent::ResponseCreated(r))) => Some(
                r.response
                    .model
                    .as_ref()
                    .unwrap_or(&self.settings.model_name)
                    .to_string(),
            ),
            _ => None,
        };

        let openai_stream = if let Some(first) = first {
            Box::pin(once(async move { first }).chain(rest))
        } else {
            rest
        };

        #[derive(Default)]
        struct StreamState {
            buffer: String,
            last: Option<Value>,
            completed: bool,
        }

        // Text deltas accumulate into a JSON prefix; a snapshot is emitted
        // whenever the completed prefix parses and differs from the last
        // one emitted.
        let stream = openai_stream
            .scan(StreamState::default(), |state, evt_res| {
                // If already completed, don't emit anything more
                if state.completed {
                    return futures::future::ready(None);
                }

                futures::future::ready(Some(match evt_res {
                    Ok(ResponseEvent::ResponseOutputTextDelta(d)) => {
                        state.buffer.push_str(&d.delta);
                        match complete_partial_json(&state.buffer) {
                            Some(snapshot) if state.last.as_ref() != Some(&snapshot) => {
                                state.last = Some(snapshot.clone());
                                Some(Ok(snapshot))
                            }
                            _ => None,
                        }
                    }
                    Ok(ResponseEvent::ResponseCompleted(_)) => {
                        state.completed = true;
                        // the full buffer must stand on its own now
                        match serde_json::from_str::<Value>(&state.buffer) {
                            Ok(snapshot) if state.last.as_ref() != Some(&snapshot) => {
                                Some(Ok(snapshot))
                            }
                            Ok(_) => None,
                            Err(e) => Some(Err(Error::NoObjectGenerated(format!(
                                "model output was not valid JSON: {e}"
                            )))),
                        }
                    }
                    Ok(ResponseEvent::ResponseFailed(f)) => {
                        state.completed = true;
                        let reason = f
                            .response
                            .error
                            .as_ref()
                            .map(|e| format!("{}: {}", e.code, e.message))
                            .unwrap_or_else(|| "unknown failure".to_string());
                        Some(Err(Error::ProviderError(reason)))
                    }
                    Ok(_) => None,
                    Err(e) => {
                        state.completed = true;
                        Some(Err(e.into()))
                    }
                }))
            })
            .filter_map(futures::future::ready);

        Ok(LanguageModelStreamResponse {
            stream: Box::pin(stream),
            model,
        })
    }
}
