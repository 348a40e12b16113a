//! Year fraction with an auditable derivation.

use std::fmt;

use crate::rounding::bankers_round;

/// Decimal places shown when a factor is rendered.
const DISPLAY_DP: u32 = 8;

/// A year fraction together with the `(numerator / denominator)` operands
/// that produced it.
///
/// Operands are append-only and render in the order they were logged. The
/// factor itself may be overwritten while a multi-part period is summed.
///
/// ```rust
/// use accrue_core::daycounts::DayCountFactor;
///
/// let mut factor = DayCountFactor::new();
/// factor.log_operands(6, 12);
/// factor.log_operands(3, 12);
/// factor.set_factor(6.0 / 12.0 + 3.0 / 12.0);
/// assert_eq!(factor.to_string(), "(6/12) + (3/12) = 0.75000000");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayCountFactor {
    factor: f64,
    operands: Vec<(i64, i64)>,
}

impl DayCountFactor {
    /// Creates an empty factor of zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the year fraction.
    #[must_use]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Replaces the year fraction. Logged operands are kept.
    pub fn set_factor(&mut self, factor: f64) {
        self.factor = factor;
    }

    /// Appends a `(numerator / denominator)` pair to the derivation.
    pub fn log_operands(&mut self, numerator: i64, denominator: i64) {
        self.operands.push((numerator, denominator));
    }

    /// Returns the logged operand pairs in insertion order.
    #[must_use]
    pub fn operands(&self) -> &[(i64, i64)] {
        &self.operands
    }
}

impl fmt::Display for DayCountFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (numerator, denominator)) in self.operands.iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            write!(f, "({numerator}/{denominator})")?;
        }
        if !self.operands.is_empty() {
            f.write_str(" = ")?;
        }
        write!(
            f,
            "{:.prec$}",
            bankers_round(self.factor, DISPLAY_DP),
            prec = DISPLAY_DP as usize
        )
    }
}
