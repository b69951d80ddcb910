//! Provides the primary user-facing function for one-shot object generation.
//!
//! This module contains the `generate_object` function, which serves as the
//! main entry point for consumers of the SDK to generate a typed object
//! using any model that implements the `LanguageModel` trait.

use crate::{
    core::{
        language_model::LanguageModel,
        types::{GenerateObjectCallOptions, GenerateObjectResponse, LanguageModelCallOptions},
        utils::resolve_messages,
    },
    error::{Error, Result},
};
use serde::de::DeserializeOwned;

/// Generates a typed object using a specified language model.
///
/// The model is asked for a single response conforming to the schema in
/// `options`, and the returned JSON text is decoded into `T`. This function
/// does not stream the output. If you want to observe the object while it
/// is being generated, use `stream_object` instead.
///
/// # Arguments
///
/// * `model` - A language model that implements the `LanguageModel` trait.
///
/// * `options` - A `GenerateObjectCallOptions` struct containing the schema,
///   prompt, and other parameters for the request.
///
/// # Errors
///
/// Returns an `Error` if the underlying model fails to generate a response,
/// or `Error::NoObjectGenerated` if the response cannot be decoded into `T`.
pub async fn generate_object<T, M>(
    mut model: M,
    options: GenerateObjectCallOptions,
) -> Result<GenerateObjectResponse<T>>
where
    T: DeserializeOwned,
    M: LanguageModel,
{
    let (system, messages) = resolve_messages(options.system, options.prompt, options.messages);

    let response = model
        .generate(
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

    let object = serde_json::from_str(&response.text).map_err(|e| {
        Error::NoObjectGenerated(format!("model output did not match the schema: {e}"))
    })?;

    Ok(GenerateObjectResponse {
        object,
        model: response.model,
    })
}
