//! Error types for the Accrue core crate.

use thiserror::Error;

use crate::types::Date;

/// A specialized Result type for core operations.
pub type AccrueResult<T> = Result<T, AccrueError>;

/// Errors raised while building cash flows and profiles.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccrueError {
    /// An input breaks one of the structural rules of a profile or cash flow.
    #[error("Configuration error: {reason}")]
    Configuration {
        /// The rule that was violated.
        reason: String,
    },

    /// A value date falls before its posting date.
    #[error("Invalid date range: value date {value} precedes posting date {posting}")]
    InvalidDateRange {
        /// Posting date of the offending cash flow.
        posting: Date,
        /// Value date of the offending cash flow.
        value: Date,
    },

    /// A date could not be constructed or parsed.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },
}

impl AccrueError {
    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Creates an invalid date range error.
    #[must_use]
    pub fn invalid_date_range(posting: Date, value: Date) -> Self {
        Self::InvalidDateRange { posting, value }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Returns true for errors caused by the shape of the input data.
    ///
    /// A value date before its posting date counts as a configuration
    /// problem.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::InvalidDateRange { .. }
        )
    }
}
