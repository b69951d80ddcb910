//! Core building blocks for structured object generation.

pub mod generate_object;
pub mod language_model;
pub mod partial_json;
pub mod schema;
pub mod stream_object;
pub mod streamable;
pub mod types;
pub mod utils;

// re-export key components for better public API.
pub use generate_object::generate_object;
pub use language_model::LanguageModel;
pub use partial_json::complete_partial_json;
pub use schema::{ObjectSchema, SchemaKind, SchemaType};
pub use stream_object::{StreamObjectResponse, stream_object};
pub use streamable::{StreamableReader, StreamableValue, StreamableWriter};
pub use types::{
    AssistantMessage, GenerateObjectCallOptions, GenerateObjectResponse, LanguageModelCallOptions,
    LanguageModelResponse, LanguageModelStreamResponse, Message, PartialObjectStream, Role,
    SystemMessage, UserMessage,
};
