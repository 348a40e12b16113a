//! # Accrue Math
//!
//! Numerical root finding for the Accrue loan solver.
//!
//! The solver is an enhanced Newton-Raphson that estimates first and second
//! derivatives by central differences, so objectives only need to be
//! evaluated, never differentiated.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::float_cmp)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{labelled, solve_root, Labelled, Objective, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
