//! Concrete LLM provider implementations
//!
//! This module contains implementations of the LLMProvider trait for
//! various LLM services.

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "gemini")]
pub mod gemini;

#[cfg(feature = "openai")]
pub use openai::{OpenAIConfig, OpenAIProvider};

#[cfg(feature = "gemini")]
pub use gemini::{GeminiConfig, GeminiProvider};
