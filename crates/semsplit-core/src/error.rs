//! Error types for the semantic splitter.

use thiserror::Error;

/// Result type alias using SplitterError.
pub type Result<T> = std::result::Result<T, SplitterError>;

/// Errors that can occur while configuring or running a splitter.
#[derive(Error, Debug)]
pub enum SplitterError {
    /// Splitter configuration violates one of its constraints.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Two vectors compared for similarity have different lengths.
    #[error("Vector dimensions must match: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    /// Embedding provider failure.
    #[error("Embedding error: {message}")]
    Embedding { message: String },

    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SplitterError {
    /// Create an invalid configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create an embedding error.
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding {
            message: message.into(),
        }
    }

    /// Create a config file error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a stable error code for machine-readable output.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            Self::DimensionMismatch { .. } => "DIMENSION_MISMATCH",
            Self::Embedding { .. } => "EMBEDDING_ERROR",
            Self::Config { .. } => "CONFIG_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}
