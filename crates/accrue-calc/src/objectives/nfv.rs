use accrue_core::daycounts::{Convention, DayCount, DayCountOrigin};
use accrue_core::{CashFlowKind, Profile};
use accrue_math::solvers::Objective;

/// Label reported when a rate solve fails.
pub const NFV_LABEL: &str = "Net Future Value";

/// Net future value of a profile at a candidate rate.
pub struct SolveNfv<'a> {
    profile: &'a mut Profile,
}

impl<'a> SolveNfv<'a> {
    /// Assigns `day_count` factors to `profile` and wraps it.
    pub fn new(profile: &'a mut Profile, day_count: Convention) -> Self {
        profile.assign_factors(day_count);
        Self { profile }
    }

    /// The profile being evaluated.
    pub fn profile(&self) -> &Profile {
        self.profile
    }
}

impl Objective for SolveNfv<'_> {
    fn label(&self) -> &str {
        NFV_LABEL
    }

    fn compute(&mut self, rate: f64) -> f64 {
        net_future_value(self.profile, rate)
    }
}

/// Evaluates the profile's balance at `rate` using the factors already
/// assigned.
///
/// Drawdown-anchored conventions discount every flow to the drawdown:
/// `sum(value * (1 + rate) ^ -factor)`. Neighbour-anchored conventions roll
/// the capital balance forward period by period, holding interest on
/// uncapitalised payments until the next capitalising one. Excluded charges
/// are skipped either way.
pub fn net_future_value(profile: &Profile, rate: f64) -> f64 {
    let day_count = profile.day_count();
    let include_charges = day_count.include_non_financing_flows();
    let flows = profile
        .cash_flows()
        .iter()
        .filter(|cf| include_charges || !cf.is_charge());

    let mut capital_balance = 0.0;
    match day_count.origin() {
        DayCountOrigin::Drawdown => {
            for cash_flow in flows {
                capital_balance += cash_flow.value() * (1.0 + rate).powf(-cash_flow.factor());
            }
        }
        DayCountOrigin::Neighbour => {
            let mut accrued_interest = 0.0;
            for cash_flow in flows {
                let period_interest = capital_balance * rate * cash_flow.factor();
                match cash_flow.kind() {
                    CashFlowKind::Payment {
                        is_interest_capitalised: true,
                        ..
                    } => {
                        capital_balance += accrued_interest + period_interest + cash_flow.value();
                        accrued_interest = 0.0;
                    }
                    CashFlowKind::Payment { .. } => {
                        accrued_interest += period_interest;
                        capital_balance += cash_flow.value();
                    }
                    _ => {
                        capital_balance += period_interest;
                        capital_balance += cash_flow.value();
                    }
                }
            }
        }
    }
    capital_balance
}

#[cfg(test)]
mod tests {
    use super::*;
    use accrue_core::daycounts::DayCountOptions;
    use accrue_core::{CashFlow, Date};
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    /// Advance of 1000 on 1 January 2019, a charge of 10 on the same day and
    /// three payments of 340.02 from 1 February.
    fn profile(first_two_capitalised: bool) -> Profile {
        let flows = vec![
            CashFlow::advance(date(2019, 1, 1), None, Some(1000.0)).unwrap(),
            CashFlow::charge(date(2019, 1, 1), 10.0),
            CashFlow::payment(date(2019, 2, 1), Some(340.02), first_two_capitalised),
            CashFlow::payment(date(2019, 3, 1), Some(340.02), first_two_capitalised),
            CashFlow::payment(date(2019, 4, 1), Some(340.02), true),
        ];
        Profile::new(flows, 2).unwrap()
    }

    #[test]
    fn test_neighbour_capitalised() {
        let mut profile = profile(true);
        let mut nfv = SolveNfv::new(&mut profile, Convention::default());
        assert_relative_eq!(nfv.compute(0.12), -0.006398000000046977, epsilon = 1e-12);
        assert_eq!(nfv.label(), "Net Future Value");
    }

    #[test]
    fn test_neighbour_rolls_uncapitalised_interest() {
        let mut profile = profile(false);
        let mut nfv = SolveNfv::new(&mut profile, Convention::default());
        assert_relative_eq!(nfv.compute(0.1216), -0.003392000000076223, epsilon = 1e-12);
    }

    #[test]
    fn test_drawdown_with_charges() {
        let mut profile = profile(true);
        let dc = Convention::thirty_360_us(DayCountOptions::new(true, true, true));
        let mut nfv = SolveNfv::new(&mut profile, dc);
        assert_relative_eq!(nfv.compute(0.1971), 0.0030105880029509535, epsilon = 1e-12);
    }

    #[test]
    fn test_drawdown_without_charges() {
        let mut profile = profile(false);
        let dc = Convention::thirty_360_us(DayCountOptions::new(true, false, true));
        let mut nfv = SolveNfv::new(&mut profile, dc);
        assert_relative_eq!(nfv.compute(0.1268), -0.0025199269198878937, epsilon = 1e-12);
    }

    #[test]
    fn test_construction_assigns_factors() {
        let mut profile = profile(true);
        let dc = Convention::act_365(DayCountOptions::default());
        let nfv = SolveNfv::new(&mut profile, dc);
        assert_eq!(nfv.profile().day_count(), dc);
        assert!(nfv.profile().cash_flows()[0].period_factor().is_some());
    }
}
