//! Core types for SDK functions.
mod messages;
mod options;
mod responses;

// re-export key components for better public API.
pub use messages::{AssistantMessage, Message, Role, SystemMessage, UserMessage};
pub use options::{
    GenerateObjectCallOptions, GenerateObjectCallOptionsBuilder, LanguageModelCallOptions,
    LanguageModelCallOptionsBuilder,
};
pub use responses::{
    GenerateObjectResponse, LanguageModelResponse, LanguageModelStreamResponse,
    PartialObjectStream,
};
