//! CLI command implementations.

pub mod factor;
pub mod rate;
pub mod value;

// Re-export submodules for convenience
pub use factor::FactorArgs;
pub use rate::RateArgs;
pub use value::ValueArgs;

use accrue_core::types::Date;
use clap::Args;

use crate::error::{CliError, CliResult};

/// Day count flags shared by every command.
#[derive(Args, Debug, Clone)]
pub struct ConventionArgs {
    /// Day count convention (30/360, 30E/360, ACT/365, ACT/ACT ISDA, EU2008/48/EC)
    #[arg(short, long)]
    pub convention: Option<String>,

    /// Measure periods between value dates instead of posting dates
    #[arg(long)]
    pub value_dates: bool,

    /// Include charges in the calculation
    #[arg(long)]
    pub include_charges: bool,

    /// Measure every period from the first drawdown (XIRR)
    #[arg(long)]
    pub xirr: bool,

    /// EU 2008/48/EC time period: year, month or week
    #[arg(long)]
    pub eu_frequency: Option<String>,
}

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}
