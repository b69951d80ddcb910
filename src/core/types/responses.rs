//! Response types for SDK functions and traits.

use futures::Stream;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::pin::Pin;

use crate::error::Result;

/*
 *CORE trait responses types
 */

/* Language Model Responses*/

/// Response from a language model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageModelResponse {
    /// The generated text. For structured requests this is the JSON
    /// rendition of the object.
    pub text: String,

    /// The model that generated the response.
    pub model: Option<String>,

    /// The reason the model stopped generating text.
    pub stop_reason: Option<String>,
}

impl LanguageModelResponse {
    /// Creates a new response with the generated text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: None,
            stop_reason: None,
        }
    }
}

/* Language Model Stream Responses*/

/// A response from a streaming language model.
pub struct LanguageModelStreamResponse {
    /// Snapshots of the object under construction, oldest first. Each
    /// snapshot refines the previous one; the last is the complete object.
    pub stream: PartialObjectStream,

    /// The model that generated the response.
    pub model: Option<String>,
}

/// Stream of partial-object snapshots mapped to a common interface.
pub type PartialObjectStream = Pin<Box<dyn Stream<Item = Result<Value>> + Send>>;

/*
 *CORE function responses types
 */

/*Generate Object Responses*/

/// Response from a `generate_object` call.
#[derive(Debug)]
pub struct GenerateObjectResponse<T> {
    /// The generated object, decoded from the model output.
    pub object: T,

    /// The model that generated the response.
    pub model: Option<String>,
}

impl<T> GenerateObjectResponse<T> {
    /// Creates a new response with the generated object.
    pub fn new(object: T) -> Self {
        Self {
            object,
            model: None,
        }
    }
}

/*Stream Object Responses*/
// The stream_object response type lives with its entry point in
// `core::stream_object`; it wraps the streamable cell rather than a plain
// provider stream.
