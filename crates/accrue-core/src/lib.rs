//! # Accrue Core
//!
//! Building blocks for solving unknown values and implicit rates in loan and
//! lease cash-flow schedules.
//!
//! - **Types**: the `Date` newtype and its calendar arithmetic
//! - **Rounding**: banker's rounding at a fixed decimal precision
//! - **Day Count Conventions**: Act/365, Act/Act ISDA, 30/360 and the
//!   EU 2008/48/EC consumer credit convention
//! - **Cash Flows**: advances, payments and charges
//! - **Profile**: the ordered, validated collection a solver works on
//!
//! ## Example
//!
//! ```rust
//! use accrue_core::prelude::*;
//!
//! let flows = vec![
//!     CashFlow::advance(Date::from_ymd(2019, 1, 1).unwrap(), None, Some(1000.0)).unwrap(),
//!     CashFlow::payment(Date::from_ymd(2019, 2, 1).unwrap(), None, true),
//!     CashFlow::payment(Date::from_ymd(2019, 3, 1).unwrap(), None, true),
//! ];
//! let mut profile = Profile::new(flows, 2).unwrap();
//! profile.assign_factors(Convention::default());
//! assert_eq!(profile.cash_flows().len(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::float_cmp)]
#![allow(clippy::cast_possible_truncation)]

pub mod cashflow;
pub mod daycounts;
pub mod error;
pub mod profile;
pub mod rounding;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cashflow::{CashFlow, CashFlowKind};
    pub use crate::daycounts::{
        Convention, DayCount, DayCountFactor, DayCountOrigin, DayCountOptions, EuFrequency,
    };
    pub use crate::error::{AccrueError, AccrueResult};
    pub use crate::profile::Profile;
    pub use crate::rounding::bankers_round;
    pub use crate::types::Date;
}

// Re-export commonly used types at crate root
pub use cashflow::{CashFlow, CashFlowKind};
pub use daycounts::{Convention, DayCountFactor};
pub use error::{AccrueError, AccrueResult};
pub use profile::Profile;
pub use types::Date;
