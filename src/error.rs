//! Error types for Tripmate.

use thiserror::Error;

/// Library-level error type for Tripmate operations.
#[derive(Error, Debug)]
pub enum TripmateError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Agent runtime error: {0}")]
    AgentRuntime(String),

    #[error("Agent runtime returned HTTP {status}: {body}")]
    AgentRuntimeStatus { status: u16, body: String },

    #[error("Tool error: {0}")]
    Tool(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Tripmate operations.
pub type Result<T> = std::result::Result<T, TripmateError>;
