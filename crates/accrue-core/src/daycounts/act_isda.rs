//! Actual/Actual ISDA.

use super::{DayCount, DayCountFactor, DayCountOptions};
use crate::types::{has_leap_year, is_leap_year, Date};

/// Actual/Actual ISDA day count convention.
///
/// Days falling in a leap year are divided by 366 and all other days by
/// 365. A period that crosses a year end and touches a leap year is split
/// at each 31 December, with one operand pair logged per non-empty portion.
/// Periods that stay within non-leap years use a single `days / 365` pair.
///
/// # Formula
///
/// $$\text{Factor} = \frac{\text{Days in non-leap years}}{365} + \frac{\text{Days in leap years}}{366}$$
///
/// Expects `start <= end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActIsda {
    options: DayCountOptions,
}

impl ActIsda {
    /// Creates the convention with the given switches.
    #[must_use]
    pub const fn new(options: DayCountOptions) -> Self {
        Self { options }
    }
}

fn year_basis(year: i32) -> i64 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

impl DayCount for ActIsda {
    fn name(&self) -> &'static str {
        "ACT/ACT ISDA"
    }

    fn options(&self) -> DayCountOptions {
        self.options
    }

    fn compute_factor(&self, start: Date, end: Date) -> DayCountFactor {
        let mut factor = DayCountFactor::new();

        if start.year() == end.year() || !has_leap_year(start.year(), end.year()) {
            let days = start.actual_days(&end);
            let basis = if start.year() == end.year() {
                year_basis(start.year())
            } else {
                365
            };
            factor.set_factor(days as f64 / basis as f64);
            factor.log_operands(days, basis);
            return factor;
        }

        let mut total = 0.0;
        let mut from = start;
        let mut year_end = start.year_end();
        while year_end.year() < end.year() {
            let days = from.actual_days(&year_end);
            let basis = year_basis(year_end.year());
            total += days as f64 / basis as f64;
            if days > 0 {
                factor.log_operands(days, basis);
            }
            from = year_end;
            year_end = year_end.add_days(1).year_end();
        }

        let days = from.actual_days(&end);
        let basis = year_basis(end.year());
        total += days as f64 / basis as f64;
        factor.log_operands(days, basis);
        factor.set_factor(total);
        factor
    }
}
