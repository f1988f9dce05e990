//! Error types for particlenet_decoder.

use thiserror::Error;

/// Errors that can occur while building or running the decoder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecoderError {
    /// Invalid configuration.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },

    /// Tensor shape mismatch.
    #[error("tensor shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape.
        expected: Vec<usize>,
        /// Actual shape.
        got: Vec<usize>,
    },

    /// Forward pass called with zero jets.
    #[error("empty batch: at least one encoded jet is required")]
    EmptyBatch,
}

impl DecoderError {
    /// Shorthand for an [`DecoderError::InvalidConfig`] error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Result type for particlenet_decoder operations.
pub type Result<T> = std::result::Result<T, DecoderError>;
