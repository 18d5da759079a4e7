//! Error types for Regn.

use thiserror::Error;

/// Library-level error type for Regn operations.
#[derive(Error, Debug)]
pub enum RegnError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// A textual value could not be converted into any numeric kind.
    #[error("Cannot convert '{0}' to a number")]
    Coercion(String),

    /// An arithmetic tool failed on one of its operands. Keeps the
    /// underlying coercion failure as the error source.
    #[error("{operation} failed: {source}")]
    Operation {
        operation: &'static str,
        #[source]
        source: Box<RegnError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Agent error: {0}")]
    Agent(String),
}

/// Result type alias for Regn operations.
pub type Result<T> = std::result::Result<T, RegnError>;
