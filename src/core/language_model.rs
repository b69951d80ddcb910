//! Defines the central `LanguageModel` trait for structured generation.
//!
//! This module provides the `LanguageModel` trait, which establishes the core
//! contract for all language models supported by the SDK. It abstracts the
//! underlying implementation details of different AI providers, offering a
//! unified interface for one-shot and streaming object generation.

use crate::core::types::{
    LanguageModelCallOptions, LanguageModelResponse, LanguageModelStreamResponse,
};
use crate::error::Result;
use async_trait::async_trait;

// ============================================================================
// Section: traits
// ============================================================================

/// The core trait abstracting the capabilities of a language model.
///
/// Implementors of `LanguageModel` provide the necessary logic to connect to
/// a specific model endpoint and produce output conforming to the JSON
/// Schema carried in the call options. The same options drive both the
/// single-shot and the streaming path.
#[async_trait]
pub trait LanguageModel: Send + Sync + std::fmt::Debug {
    /// Performs a single, non-streaming generation request.
    ///
    /// This method sends a prompt to the model and returns the entire
    /// response at once, with the object rendered as JSON text.
    ///
    /// # Errors
    ///
    /// Returns an `Error` if the API call fails or the request is invalid.
    async fn generate(&mut self, options: LanguageModelCallOptions) -> Result<LanguageModelResponse>;

    /// Performs a streaming generation request.
    ///
    /// This method sends a prompt to the model and returns a stream of
    /// partial-object snapshots: each item is a parseable refinement of the
    /// one before it, and the last item is the complete object.
    ///
    /// # Errors
    ///
    /// Returns an `Error` if the API call fails or the request is invalid.
    async fn generate_stream(
        &mut self,
        options: LanguageModelCallOptions,
    ) -> Result<LanguageModelStreamResponse>;
}
