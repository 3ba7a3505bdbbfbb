//! Chat model implementations.
//!
//! This module provides the production implementation of the `ChatModel`
//! trait. Tests use `MockChatModel` from [`crate::testing`].

#[cfg(feature = "openai")]
mod openai;

#[cfg(feature = "openai")]
pub use openai::OpenAIChatModel;
