//! This module provides the language model providers supported by the SDK.

#[cfg(feature = "openai")]
pub mod openai;
