//! Banker's rounding for monetary values.
//!
//! Values are settled to eight decimal places before the half-to-even rule is
//! applied, so binary noise such as `1.535 * 100 = 153.49999999999997` is read
//! as the tie it was written as.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places used to settle binary noise before rounding.
const SETTLE_DP: u32 = 8;

/// Rounds `value` to `precision` decimal places, sending ties to the even digit.
///
/// Non-finite values and values too large to scale are returned unchanged.
///
/// # Example
///
/// ```rust
/// use accrue_core::rounding::bankers_round;
///
/// assert_eq!(bankers_round(2.5, 0), 2.0);
/// assert_eq!(bankers_round(1.535, 2), 1.54);
/// assert_eq!(bankers_round(1.525, 2), 1.52);
/// ```
#[must_use]
pub fn bankers_round(value: f64, precision: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let Some(decimal) = Decimal::from_f64_retain(value) else {
        return value;
    };
    let Some(scaled) = 10u64
        .checked_pow(precision)
        .and_then(|factor| decimal.checked_mul(Decimal::from(factor)))
    else {
        return value;
    };

    let whole = scaled
        .round_dp_with_strategy(SETTLE_DP, RoundingStrategy::MidpointAwayFromZero)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);

    match whole.to_f64() {
        Some(whole) => whole / 10f64.powi(precision as i32),
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ties_go_to_even() {
        assert_eq!(bankers_round(1.5, 0), 2.0);
        assert_eq!(bankers_round(2.5, 0), 2.0);
        assert_eq!(bankers_round(-2.5, 0), -2.0);
        assert_eq!(bankers_round(1.535, 2), 1.54);
        assert_eq!(bankers_round(1.525, 2), 1.52);
        assert_eq!(bankers_round(0.0125, 3), 0.012);
        assert_eq!(bankers_round(0.00135, 4), 0.0014);
    }

    #[test]
    fn test_non_ties_round_to_nearest() {
        assert_eq!(bankers_round(2666.6706, 2), 2666.67);
        assert_eq!(bankers_round(340.0249, 2), 340.02);
        assert_eq!(bankers_round(-999.989, 2), -999.99);
        assert_eq!(bankers_round(0.375, 8), 0.375);
    }

    #[test]
    fn test_non_finite_passthrough() {
        assert!(bankers_round(f64::NAN, 2).is_nan());
        assert_eq!(bankers_round(f64::INFINITY, 2), f64::INFINITY);
    }

    proptest! {
        #[test]
        fn prop_half_integers_round_to_even(k in -100_000i64..100_000) {
            let rounded = bankers_round(k as f64 + 0.5, 0);
            prop_assert_eq!(rounded.rem_euclid(2.0), 0.0);
            prop_assert!((rounded - (k as f64 + 0.5)).abs() <= 0.5);
        }

        #[test]
        fn prop_rounding_is_idempotent(
            x in -1_000_000.0f64..1_000_000.0,
            p in prop::sample::select(vec![0u32, 2, 3, 4]),
        ) {
            let once = bankers_round(x, p);
            prop_assert_eq!(bankers_round(once, p), once);
            prop_assert!((once - x).abs() <= 0.5 / 10f64.powi(p as i32) + 1e-9);
        }
    }
}
