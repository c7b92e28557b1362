use thiserror::Error;

/// Unified error type for release-tagger operations
#[derive(Error, Debug)]
pub enum TaggerError {
    #[error("Invalid bump: {0}")]
    InvalidBump(String),

    #[error("No base version: {0}")]
    NoBaseVersion(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-tagger
pub type Result<T> = std::result::Result<T, TaggerError>;

impl TaggerError {
    /// Create an invalid bump error with context
    pub fn invalid_bump(msg: impl Into<String>) -> Self {
        TaggerError::InvalidBump(msg.into())
    }

    /// Create a missing base version error with context
    pub fn no_base_version(msg: impl Into<String>) -> Self {
        TaggerError::NoBaseVersion(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        TaggerError::Config(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        TaggerError::Tag(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        TaggerError::Remote(msg.into())
    }
}
