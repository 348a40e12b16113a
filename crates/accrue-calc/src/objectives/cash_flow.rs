use accrue_core::daycounts::Convention;
use accrue_core::Profile;
use accrue_math::solvers::Objective;

use super::SolveNfv;

/// Label reported when a value solve fails.
pub const CASH_FLOW_LABEL: &str = "Cash Flow Value";

/// Net future value at a fixed rate as a function of the unknown amount.
///
/// Each evaluation writes the guess, unrounded, into every unknown cash
/// flow before re-evaluating the profile. The root is the amount that
/// leaves nothing outstanding at `effective_rate`.
pub struct SolveCashFlow<'a> {
    profile: &'a mut Profile,
    day_count: Convention,
    effective_rate: f64,
}

impl<'a> SolveCashFlow<'a> {
    /// Assigns `day_count` factors to `profile` and wraps it.
    pub fn new(profile: &'a mut Profile, day_count: Convention, effective_rate: f64) -> Self {
        profile.assign_factors(day_count);
        Self {
            profile,
            day_count,
            effective_rate,
        }
    }

    /// The rate the amount is solved at.
    pub fn effective_rate(&self) -> f64 {
        self.effective_rate
    }
}

impl Objective for SolveCashFlow<'_> {
    fn label(&self) -> &str {
        CASH_FLOW_LABEL
    }

    fn compute(&mut self, guess: f64) -> f64 {
        self.profile.update_values(guess, false);
        SolveNfv::new(self.profile, self.day_count).compute(self.effective_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accrue_core::{CashFlow, Date};
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_guess_is_written_unrounded() {
        let flows = vec![
            CashFlow::advance(date(2019, 1, 1), None, Some(1000.0)).unwrap(),
            CashFlow::charge(date(2019, 1, 1), 10.0),
            CashFlow::payment(date(2019, 2, 1), None, true),
            CashFlow::payment(date(2019, 3, 1), None, true),
            CashFlow::payment(date(2019, 4, 1), None, true),
        ];
        let mut profile = Profile::new(flows, 2).unwrap();

        {
            let mut objective = SolveCashFlow::new(&mut profile, Convention::default(), 0.12);
            assert_eq!(objective.label(), "Cash Flow Value");
            assert_eq!(objective.effective_rate(), 0.12);
            assert_relative_eq!(objective.compute(340.02), -0.006398000000046977, epsilon = 1e-12);
            objective.compute(340.0249);
        }

        let unknown: Vec<f64> = profile
            .cash_flows()
            .iter()
            .filter(|cf| !cf.is_known())
            .map(CashFlow::value)
            .collect();
        assert_eq!(unknown, vec![340.0249; 3]);
    }
}
