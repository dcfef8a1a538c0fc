//! Error types for Ushauri.

use thiserror::Error;

/// Library-level error type for Ushauri operations.
#[derive(Error, Debug)]
pub enum UshauriError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Model call failed: {0}")]
    Remote(String),

    #[error("Model call timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Unknown agent: {0}. Expected 'logistics' or 'community'")]
    UnknownAgent(String),

    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    #[error("Agent error: {0}")]
    Agent(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),
}

impl UshauriError {
    /// The cause text without the variant's own prefix.
    pub fn detail(&self) -> String {
        match self {
            UshauriError::Remote(msg) | UshauriError::OpenAI(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for Ushauri operations.
pub type Result<T> = std::result::Result<T, UshauriError>;
