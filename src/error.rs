//! Error types for the SDK.

/// Errors that can occur when generating or streaming structured objects.
///
/// The enum is `Clone` because a terminal stream failure is re-raised to
/// every reader of a [`crate::core::StreamableValue`], each of which
/// receives its own copy.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The caller supplied an invalid combination of inputs.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The model finished without producing a decodable object.
    #[error("No object generated: {0}")]
    NoObjectGenerated(String),

    /// The provider call failed.
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// The producer side of a streamable value vanished or panicked
    /// before reaching a terminal state.
    #[error("Stream aborted: {0}")]
    StreamAborted(String),

    /// An options builder was finalized with a required field missing.
    #[error("Builder error: {0}")]
    BuilderError(String),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl From<derive_builder::UninitializedFieldError> for Error {
    fn from(value: derive_builder::UninitializedFieldError) -> Self {
        Error::BuilderError(value.to_string())
    }
}

#[cfg(feature = "openai")]
impl From<async_openai::error::OpenAIError> for Error {
    fn from(value: async_openai::error::OpenAIError) -> Self {
        Error::ProviderError(value.to_string())
    }
}
