//! Error types for the relate-rs library.
//!
//! Every failure in a matrix build is surfaced as a typed [`RelateError`].
//! Computations are pure, so no variant is retryable and no partial matrix is
//! ever returned alongside an error.

use std::io;
use std::num::ParseIntError;

use thiserror::Error;

/// Main result type for relate operations.
pub type Result<T> = std::result::Result<T, RelateError>;

/// Error type for all relate operations.
#[derive(Error, Debug)]
pub enum RelateError {
    /// Hamming similarity invoked on strings of different length
    #[error("Length mismatch: {message} ({left} vs {right} characters)")]
    LengthMismatch {
        /// Error description
        message: String,
        /// Character count of the left string
        left: usize,
        /// Character count of the right string
        right: usize,
    },

    /// A denominator evaluated to zero (empty token sets, filtered-out
    /// positions, degenerate standardization population)
    #[error("Division by zero: {message}")]
    DivideByZero {
        /// Error description
        message: String,
        /// Operation in which the zero denominator appeared
        context: Option<String>,
    },

    /// Metric name outside the supported set
    #[error("Unknown metric: '{name}'")]
    UnknownMetric {
        /// Name that failed to resolve
        name: String,
    },

    /// Matrix kind outside the supported set
    #[error("Unknown matrix kind: '{name}'")]
    UnknownMatrixKind {
        /// Name that failed to resolve
        name: String,
    },

    /// Label count does not match the number of texts
    #[error("Shape mismatch: {message} (expected {expected}, got {actual})")]
    ShapeMismatch {
        /// Error description
        message: String,
        /// Expected element count
        expected: usize,
        /// Actual element count
        actual: usize,
    },

    /// I/O related errors (text sources, config files)
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Data format being serialized
        data_type: Option<String>,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for input data
    #[error("Validation error: {message}")]
    Validation {
        /// Error description
        message: String,
        /// Field or input that failed validation
        field: Option<String>,
        /// Expected value or format
        expected: Option<String>,
        /// Actual value received
        actual: Option<String>,
    },
}

impl RelateError {
    /// Create a new length mismatch error
    pub fn length_mismatch(message: impl Into<String>, left: usize, right: usize) -> Self {
        Self::LengthMismatch {
            message: message.into(),
            left,
            right,
        }
    }

    /// Create a new division-by-zero error
    pub fn divide_by_zero(message: impl Into<String>) -> Self {
        Self::DivideByZero {
            message: message.into(),
            context: None,
        }
    }

    /// Create a new unknown metric error
    pub fn unknown_metric(name: impl Into<String>) -> Self {
        Self::UnknownMetric { name: name.into() }
    }

    /// Create a new unknown matrix kind error
    pub fn unknown_matrix_kind(name: impl Into<String>) -> Self {
        Self::UnknownMatrixKind { name: name.into() }
    }

    /// Create a new shape mismatch error
    pub fn shape_mismatch(message: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            message: message.into(),
            expected,
            actual,
        }
    }

    /// Create a new I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new configuration error with field context
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
            expected: None,
            actual: None,
        }
    }

    /// Create a new validation error naming the offending field and value
    pub fn validation_field(
        message: impl Into<String>,
        field: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
            expected: None,
            actual: Some(actual.into()),
        }
    }

    /// Add context to an existing error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        if let Self::DivideByZero { context: ctx, .. } = &mut self {
            *ctx = Some(context.into());
        }
        self
    }
}

impl From<io::Error> for RelateError {
    fn from(err: io::Error) -> Self {
        Self::io("I/O operation failed", err)
    }
}

impl From<serde_json::Error> for RelateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: format!("JSON serialization failed: {err}"),
            data_type: Some("JSON".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml::Error> for RelateError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: format!("YAML serialization failed: {err}"),
            data_type: Some("YAML".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<ParseIntError> for RelateError {
    fn from(err: ParseIntError) -> Self {
        Self::validation(format!("Invalid integer: {err}"))
    }
}

/// Result extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;

    /// Add static context to an error result
    fn context(self, msg: &'static str) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<RelateError>,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }

    fn context(self, msg: &'static str) -> Result<T> {
        self.map_err(|e| e.into().with_context(msg))
    }
}
