//! Result and error types for hemioct.

use thiserror::Error;

/// Result type for hemioct operations
pub type HemiOctResult<T> = Result<T, HemiOctError>;

/// Errors that can occur in hemioct
#[derive(Debug, Error)]
pub enum HemiOctError {
    /// A configuration value is outside its valid range
    #[error("Invalid configuration for `{field}`: {message}")]
    InvalidConfig {
        /// Offending configuration key
        field: String,
        /// Why the value was rejected
        message: String,
    },

    /// Decoder input lies outside the open parameter domain
    #[error("Parameter ({u}, {v}) is outside the open domain (-1, 1)")]
    OutOfDomain {
        /// First parameter
        u: f64,
        /// Second parameter
        v: f64,
    },

    /// Field arrays disagree in shape
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// Expected (rows, cols)
        expected: (usize, usize),
        /// Actual (rows, cols)
        actual: (usize, usize),
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl HemiOctError {
    /// Create an invalid configuration error
    #[must_use]
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }
}
