//! Calculator settings.
//!
//! Settings are plain serde data so they can be read from a TOML file and
//! overridden field by field.

use accrue_core::daycounts::{Convention, DayCountConvention, DayCountOptions, EuFrequency};
use accrue_core::profile::validate_precision;
use serde::{Deserialize, Serialize};

use crate::error::CalcResult;

// =============================================================================
// CALCULATOR CONFIGURATION
// =============================================================================

/// Settings shared by a calculation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Decimal places for monetary values (0, 2, 3 or 4).
    #[serde(default = "default_precision")]
    pub precision: u32,

    /// Day count convention family.
    #[serde(default)]
    pub convention: DayCountConvention,

    /// Measure periods between value dates instead of posting dates.
    #[serde(default)]
    pub use_value_dates: bool,

    /// Include charges (needed for an APR).
    #[serde(default)]
    pub include_charges: bool,

    /// Measure every period from the first drawdown.
    #[serde(default)]
    pub use_xirr: bool,

    /// Time period for EU 2008/48/EC.
    #[serde(default)]
    pub eu_frequency: EuFrequency,
}

fn default_precision() -> u32 {
    2
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            convention: DayCountConvention::default(),
            use_value_dates: false,
            include_charges: false,
            use_xirr: false,
            eu_frequency: EuFrequency::default(),
        }
    }
}

impl CalculatorConfig {
    /// Checks the precision.
    pub fn validate(&self) -> CalcResult<()> {
        validate_precision(self.precision)?;
        Ok(())
    }

    /// Day count switches implied by these settings.
    #[must_use]
    pub fn day_count_options(&self) -> DayCountOptions {
        DayCountOptions::new(!self.use_value_dates, self.include_charges, self.use_xirr)
    }

    /// Builds the configured convention.
    #[must_use]
    pub fn convention(&self) -> Convention {
        self.convention
            .configure(self.day_count_options(), self.eu_frequency)
    }
}
