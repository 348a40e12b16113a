//! Root finding over single-argument objectives.
//!
//! An [`Objective`] is evaluated through `&mut self`, so an objective may
//! update the state it reads from (for example, writing each guess into a
//! cash-flow profile) between evaluations.
//!
//! # Example
//!
//! ```rust
//! use accrue_math::solvers::{labelled, solve_root, SolverConfig};
//!
//! let mut objective = labelled("Square Root", |x: f64| x * x - 2.0);
//! let config = SolverConfig::default().with_initial_guess(1.0);
//! let result = solve_root(&mut objective, &config).unwrap();
//! assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-7);
//! ```

mod enhanced_newton;

pub use enhanced_newton::solve_root;

use crate::error::{MathError, MathResult};

/// Default step tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-7;

/// Default iteration cap.
pub const DEFAULT_MAX_ITERATIONS: u32 = 50;

/// Default starting guess.
pub const DEFAULT_GUESS: f64 = 0.1;

/// Configuration for the root finder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Convergence is reached once a step is no larger than this.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
    /// Starting point for the iteration.
    pub initial_guess: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            initial_guess: DEFAULT_GUESS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32, initial_guess: f64) -> Self {
        Self {
            tolerance,
            max_iterations,
            initial_guess,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the starting guess.
    #[must_use]
    pub fn with_initial_guess(mut self, initial_guess: f64) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    /// Rejects non-positive tolerances, a zero iteration cap and non-finite guesses.
    pub fn validate(&self) -> MathResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(MathError::invalid_input(format!(
                "tolerance must be a positive number, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(MathError::invalid_input("max_iterations must be at least 1"));
        }
        if !self.initial_guess.is_finite() {
            return Err(MathError::invalid_input(format!(
                "initial guess must be finite, got {}",
                self.initial_guess
            )));
        }
        Ok(())
    }
}

/// Result of a successful solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Objective value at the last evaluated guess.
    pub residual: f64,
}

/// A function of one variable the root finder can drive to zero.
pub trait Objective {
    /// Name used in error messages.
    fn label(&self) -> &str;

    /// Evaluates the objective at `x`.
    fn compute(&mut self, x: f64) -> f64;
}

impl<O: Objective + ?Sized> Objective for &mut O {
    fn label(&self) -> &str {
        (**self).label()
    }

    fn compute(&mut self, x: f64) -> f64 {
        (**self).compute(x)
    }
}

/// A closure paired with a label.
#[derive(Debug, Clone)]
pub struct Labelled<F> {
    label: String,
    f: F,
}

/// Wraps a closure as an [`Objective`].
pub fn labelled<F>(label: impl Into<String>, f: F) -> Labelled<F>
where
    F: FnMut(f64) -> f64,
{
    Labelled {
        label: label.into(),
        f,
    }
}

impl<F> Objective for Labelled<F>
where
    F: FnMut(f64) -> f64,
{
    fn label(&self) -> &str {
        &self.label
    }

    fn compute(&mut self, x: f64) -> f64 {
        (self.f)(x)
    }
}
