//! Configuration error types
//!
//! Scoring and trigger evaluation never fail; only configuration supplied by
//! a caller can be rejected, and only on the strict update path.

use thiserror::Error;

/// Result type alias for strict configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised when a configuration patch is validated strictly
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Sentiment threshold outside the score range
    #[error("Sentiment threshold {value} is outside [-1, 1]")]
    ThresholdOutOfRange { value: f64 },

    /// Sentiment threshold is NaN or infinite
    #[error("Sentiment threshold must be a finite number")]
    NonFiniteThreshold,

    /// A turn limit of zero would escalate every conversation
    #[error("max_turns must be at least 1")]
    ZeroMaxTurns,

    /// Blank entry in a keyword or phrase list
    #[error("Empty entry in {field}")]
    EmptyTerm { field: &'static str },

    /// A term could not be compiled into a matcher
    #[error("Invalid pattern for term '{term}': {message}")]
    InvalidPattern { term: String, message: String },
}

impl ConfigError {
    /// Create an invalid pattern error
    pub fn invalid_pattern(term: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            term: term.into(),
            message: message.into(),
        }
    }
}
