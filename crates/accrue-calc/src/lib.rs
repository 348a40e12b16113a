//! # Accrue Calc
//!
//! Solving engine for loan and lease cash-flow schedules.
//!
//! - **Series**: recurring advance, payment and charge descriptors expanded
//!   into dated cash flows
//! - **Objectives**: net future value as a function of rate or of the
//!   unknown amount
//! - **Calculator**: `solve_value` and `solve_rate` over a built or bespoke
//!   profile
//! - **Schedule**: the amortisation table of a solved profile
//!
//! ## Example
//!
//! ```rust
//! use accrue_calc::prelude::*;
//!
//! let start = Date::from_ymd(2019, 1, 1).unwrap();
//! let mut calc = Calculator::new(2).unwrap().with_start_date(start);
//! calc.add(SeriesAdvance::new().with_amount(1000.0)).unwrap();
//! calc.add(
//!     SeriesPayment::new()
//!         .with_amount(340.02)
//!         .with_number_of(3)
//!         .with_mode(Mode::Arrear),
//! )
//! .unwrap();
//!
//! let rate = calc.solve_rate(Convention::default()).unwrap();
//! assert!((rate - 0.12).abs() < 1e-3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::similar_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::float_cmp)]

pub mod calculator;
pub mod config;
pub mod error;
pub mod objectives;
pub mod schedule;
pub mod series;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calculator::Calculator;
    pub use crate::config::CalculatorConfig;
    pub use crate::error::{CalcError, CalcResult};
    pub use crate::schedule::{Schedule, ScheduleRow, ScheduleTotals};
    pub use crate::series::{
        CashFlowBuilder, Frequency, Mode, Series, SeriesAdvance, SeriesCharge, SeriesPayment,
    };

    pub use accrue_core::prelude::*;
    pub use accrue_math::solvers::SolverConfig;
}

pub use calculator::Calculator;
pub use config::CalculatorConfig;
pub use error::{CalcError, CalcResult};
pub use schedule::Schedule;
pub use series::Series;
