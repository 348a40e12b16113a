//! Actual/365 Fixed.

use super::{DayCount, DayCountFactor, DayCountOptions};
use crate::types::Date;

/// Actual/365 Fixed day count convention.
///
/// # Formula
///
/// $$\text{Factor} = \frac{|\text{Actual Days}|}{365}$$
///
/// The year basis is always 365, leap years included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365 {
    options: DayCountOptions,
}

impl Act365 {
    /// Creates the convention with the given switches.
    #[must_use]
    pub const fn new(options: DayCountOptions) -> Self {
        Self { options }
    }
}

impl DayCount for Act365 {
    fn name(&self) -> &'static str {
        "ACT/365"
    }

    fn options(&self) -> DayCountOptions {
        self.options
    }

    fn compute_factor(&self, start: Date, end: Date) -> DayCountFactor {
        let days = start.actual_days(&end);
        let mut factor = DayCountFactor::new();
        factor.set_factor(days as f64 / 365.0);
        factor.log_operands(days, 365);
        factor
    }
}
