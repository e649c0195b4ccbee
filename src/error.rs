//! Error types for nerconv.

use thiserror::Error;

/// Result type for nerconv operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for nerconv operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Source file parsing error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Record serialization error.
    #[error("Serialize error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Invalid file-discovery pattern.
    #[error("Pattern error: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl Error {
    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}
