//! Objective functions driven by the root finder.
//!
//! - [`SolveNfv`]: net future value as a function of the interest rate
//! - [`SolveCashFlow`]: net future value as a function of the unknown
//!   cash-flow amount, at a fixed rate
//!
//! Both borrow the profile mutably for their whole lifetime: constructing
//! either one re-sorts the profile and reassigns its period factors, and
//! [`SolveCashFlow`] writes every guess into the profile's unknown entries.

mod cash_flow;
mod nfv;

pub use cash_flow::{SolveCashFlow, CASH_FLOW_LABEL};
pub use nfv::{net_future_value, SolveNfv, NFV_LABEL};
