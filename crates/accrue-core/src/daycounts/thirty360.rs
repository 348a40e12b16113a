//! 30/360 day count conventions.

use serde::{Deserialize, Serialize};

use super::{DayCount, DayCountFactor, DayCountOptions};
use crate::types::Date;

/// Day-of-month adjustment rule for 30/360.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Thirty360Basis {
    /// Bond basis: D1 31 becomes 30; D2 31 becomes 30 only if adjusted D1 is 30.
    #[default]
    Us,
    /// 30E/360: a 31st becomes the 30th at both ends.
    European,
}

/// 30/360 day count convention.
///
/// # Formula
///
/// $$\text{Factor} = \frac{|360 \times (Y_2 - Y_1) + 30 \times (M_2 - M_1) + (D_2 - D_1)|}{360}$$
///
/// with day adjustments per [`Thirty360Basis`]. No end-of-February rule is
/// applied, so 28 January to 29 February 2020 counts 31 days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360 {
    basis: Thirty360Basis,
    options: DayCountOptions,
}

impl Thirty360 {
    /// Creates the convention with the given basis and switches.
    #[must_use]
    pub const fn new(basis: Thirty360Basis, options: DayCountOptions) -> Self {
        Self { basis, options }
    }

    /// Returns the day adjustment rule.
    #[must_use]
    pub const fn basis(&self) -> Thirty360Basis {
        self.basis
    }

    /// Day count between two dates under this basis, always non-negative.
    #[must_use]
    pub fn day_count(&self, start: Date, end: Date) -> i64 {
        let d1 = if start.day() == 31 { 30 } else { start.day() };
        let d2 = match self.basis {
            Thirty360Basis::Us if end.day() == 31 && d1 >= 30 => 30,
            Thirty360Basis::Us => end.day(),
            Thirty360Basis::European => end.day().min(30),
        };

        let years = i64::from(end.year() - start.year());
        let months = i64::from(end.month()) - i64::from(start.month());
        let days = i64::from(d2) - i64::from(d1);

        (360 * years + 30 * months + days).abs()
    }
}

impl DayCount for Thirty360 {
    fn name(&self) -> &'static str {
        match self.basis {
            Thirty360Basis::Us => "30/360",
            Thirty360Basis::European => "30E/360",
        }
    }

    fn options(&self) -> DayCountOptions {
        self.options
    }

    fn compute_factor(&self, start: Date, end: Date) -> DayCountFactor {
        let days = self.day_count(start, end);
        let mut factor = DayCountFactor::new();
        factor.set_factor(days as f64 / 360.0);
        factor.log_operands(days, 360);
        factor
    }
}
