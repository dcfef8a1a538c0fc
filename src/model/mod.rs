//! Remote text generation.
//!
//! Tools only ever see the [`TextGenerator`] trait: text in, text out, may fail.

mod openai;

pub use openai::OpenAIGenerator;

use crate::error::Result;
use async_trait::async_trait;
use std::fmt;

/// A rendered prompt. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trait for remote text generation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send one prompt and return the raw model text.
    async fn generate(&self, prompt: &Prompt) -> Result<String>;
}
