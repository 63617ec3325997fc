//! Core error types for UNVEIL.
//!
//! The sequencer itself never fails; these errors come from parsing
//! configuration and user-supplied options.

/// Core result type
pub type CoreResult<T> = Result<T, CoreError>;

/// Core error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Config document could not be parsed
    #[error("Invalid config: {reason}")]
    InvalidConfig {
        /// Parser message
        reason: String,
    },

    /// A field holds a value that cannot be clamped into range
    #[error("Validation failed for {field}: {reason}")]
    Validation {
        /// Offending field
        field: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Granularity name not recognised
    #[error("Unknown granularity: {0} (expected `char` or `grapheme`)")]
    UnknownGranularity(String),

    /// Cursor placement name not recognised
    #[error("Unknown cursor placement: {0} (expected `last_non_empty` or `last_line`)")]
    UnknownPlacement(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig {
            reason: err.to_string(),
        }
    }
}
