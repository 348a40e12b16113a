//! Error types for numerical routines.

use thiserror::Error;

/// A specialized Result type for mathematical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during root finding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// The solver ran out of iterations or produced a non-finite guess.
    #[error("Unable to solve the {objective} within a maximum {iterations} attempts")]
    ConvergenceFailed {
        /// Label of the objective being solved.
        objective: String,
        /// Iteration cap that applied.
        iterations: u32,
        /// Guess the solver stopped on.
        guess: f64,
        /// Objective value at the last evaluated guess.
        residual: f64,
    },

    /// Invalid solver input.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates a convergence failure error.
    #[must_use]
    pub fn convergence_failed(
        objective: impl Into<String>,
        iterations: u32,
        guess: f64,
        residual: f64,
    ) -> Self {
        Self::ConvergenceFailed {
            objective: objective.into(),
            iterations,
            guess,
            residual,
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convergence_message_names_objective() {
        let err = MathError::convergence_failed("Net Future Value", 50, f64::NAN, 1.5);
        assert_eq!(
            err.to_string(),
            "Unable to solve the Net Future Value within a maximum 50 attempts"
        );
    }

    #[test]
    fn test_invalid_input() {
        let err = MathError::invalid_input("tolerance must be positive");
        assert!(err.to_string().contains("tolerance"));
    }
}
