//! Recurrence frequency and timing mode.

use accrue_core::types::Date;
use serde::{Deserialize, Serialize};

use crate::error::CalcResult;

/// Interval between the cash flows of a series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Every 7 days.
    Weekly,
    /// Every 14 days.
    Fortnightly,
    /// Every month.
    #[default]
    Monthly,
    /// Every 3 months.
    Quarterly,
    /// Every 6 months.
    HalfYearly,
    /// Every 12 months.
    Yearly,
}

impl Frequency {
    /// Moves `date` forward one interval.
    ///
    /// Month-based frequencies land on `preferred_day` where the target
    /// month allows it, otherwise on that month's last day.
    pub fn roll(self, date: Date, preferred_day: u32) -> CalcResult<Date> {
        let rolled = match self {
            Self::Weekly => date.add_days(7),
            Self::Fortnightly => date.add_days(14),
            Self::Monthly => date.add_months_with_day(1, Some(preferred_day))?,
            Self::Quarterly => date.add_months_with_day(3, Some(preferred_day))?,
            Self::HalfYearly => date.add_months_with_day(6, Some(preferred_day))?,
            Self::Yearly => date.add_months_with_day(12, Some(preferred_day))?,
        };
        Ok(rolled)
    }
}

/// Whether a series is paid at the start or the end of each interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// At the start: the first cash flow falls on the start date.
    #[default]
    Advance,
    /// At the end: the first cash flow falls one interval after the start date.
    Arrear,
}
