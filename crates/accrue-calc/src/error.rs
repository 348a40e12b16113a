//! Unified error type for calculations.

use accrue_core::AccrueError;
use accrue_math::MathError;
use thiserror::Error;

/// Result type alias for calculator operations.
pub type CalcResult<T> = Result<T, CalcError>;

/// Errors raised while building or solving a schedule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Inputs break a structural rule.
    #[error("Configuration error: {reason}")]
    Configuration {
        /// The rule that was violated.
        reason: String,
    },

    /// The root finder failed.
    #[error(
        "Unable to solve the {objective} within a maximum {iterations} attempts \
         (last guess {guess}, residual {residual})"
    )]
    Convergence {
        /// Label of the objective being solved.
        objective: String,
        /// Iteration cap that applied.
        iterations: u32,
        /// Guess the solver stopped on.
        guess: f64,
        /// Objective value at that guess.
        residual: f64,
    },

    /// A date could not be built.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Invalid solver input.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl CalcError {
    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }
}

impl From<AccrueError> for CalcError {
    fn from(err: AccrueError) -> Self {
        match err {
            AccrueError::Configuration { reason } => Self::Configuration { reason },
            AccrueError::InvalidDateRange { .. } => Self::Configuration {
                reason: err.to_string(),
            },
            AccrueError::InvalidDate { message } => Self::InvalidDate(message),
        }
    }
}

impl From<MathError> for CalcError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::ConvergenceFailed {
                objective,
                iterations,
                guess,
                residual,
            } => Self::Convergence {
                objective,
                iterations,
                guess,
                residual,
            },
            MathError::InvalidInput { reason } => Self::InvalidInput(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accrue_core::Date;

    #[test]
    fn test_from_core_error() {
        let err: CalcError = AccrueError::configuration("no payments").into();
        assert_eq!(err, CalcError::configuration("no payments"));

        let posting = Date::from_ymd(2019, 2, 1).unwrap();
        let value = Date::from_ymd(2019, 1, 1).unwrap();
        let err: CalcError = AccrueError::invalid_date_range(posting, value).into();
        assert!(matches!(err, CalcError::Configuration { .. }));
    }

    #[test]
    fn test_from_math_error() {
        let err: CalcError =
            MathError::convergence_failed("Cash Flow Value", 50, 0.25, 1.0).into();
        assert_eq!(
            err,
            CalcError::Convergence {
                objective: "Cash Flow Value".to_string(),
                iterations: 50,
                guess: 0.25,
                residual: 1.0,
            }
        );
        assert_eq!(
            err.to_string(),
            "Unable to solve the Cash Flow Value within a maximum 50 attempts \
             (last guess 0.25, residual 1)"
        );
    }
}
