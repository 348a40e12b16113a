//! Entry point for solving unknown values and implicit rates.

use accrue_core::daycounts::Convention;
use accrue_core::profile::validate_precision;
use accrue_core::rounding::bankers_round;
use accrue_core::types::Date;
use accrue_core::Profile;
use accrue_math::solvers::{solve_root, SolverConfig};
use tracing::{debug, info};

use crate::error::{CalcError, CalcResult};
use crate::objectives::{SolveCashFlow, SolveNfv};
use crate::series::{CashFlowBuilder, Series};

/// Collects series (or wraps a bespoke profile) and solves for the unknown.
///
/// Undated series are laid out from the start date, which defaults to
/// today. Pin it with [`Calculator::with_start_date`] for reproducible
/// schedules.
///
/// # Example
///
/// ```rust
/// use accrue_calc::prelude::*;
///
/// let mut calc = Calculator::new(2).unwrap()
///     .with_start_date(Date::from_ymd(2019, 1, 1).unwrap());
/// calc.add(SeriesAdvance::new().with_amount(1000.0)).unwrap();
/// calc.add(SeriesPayment::new().with_number_of(3).with_mode(Mode::Arrear)).unwrap();
///
/// let payment = calc.solve_value(Convention::default(), 0.12).unwrap();
/// assert_eq!(payment, 340.02);
/// ```
#[derive(Debug, Clone)]
pub struct Calculator {
    precision: u32,
    series: Vec<Series>,
    profile: Option<Profile>,
    is_bespoke: bool,
    start_date: Option<Date>,
    solver: SolverConfig,
}

impl Calculator {
    /// Creates a calculator rounding to `precision` decimal places.
    ///
    /// # Errors
    ///
    /// Returns `CalcError::Configuration` unless `precision` is 0, 2, 3 or 4.
    pub fn new(precision: u32) -> CalcResult<Self> {
        Ok(Self {
            precision: validate_precision(precision)?,
            series: Vec::new(),
            profile: None,
            is_bespoke: false,
            start_date: None,
            solver: SolverConfig::default(),
        })
    }

    /// Wraps a hand-built profile. Its precision takes precedence.
    #[must_use]
    pub fn with_profile(profile: Profile) -> Self {
        Self {
            precision: profile.precision(),
            series: Vec::new(),
            profile: Some(profile),
            is_bespoke: true,
            start_date: None,
            solver: SolverConfig::default(),
        }
    }

    /// Sets the date undated series start from.
    #[must_use]
    pub fn with_start_date(mut self, date: Date) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Overrides the root finder settings.
    #[must_use]
    pub fn with_solver_config(mut self, config: SolverConfig) -> Self {
        self.solver = config;
        self
    }

    /// Decimal places applied to monetary values.
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// The series added so far.
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// The profile built by the last solve, or the bespoke profile.
    pub fn profile(&self) -> CalcResult<&Profile> {
        self.profile
            .as_ref()
            .ok_or_else(|| CalcError::configuration("The profile has not been initialised yet."))
    }

    /// Appends a series, rounding its amount to the calculator precision.
    ///
    /// Order matters for undated series: each follows on from the previous
    /// series of the same type. Any previously built profile is discarded.
    ///
    /// # Errors
    ///
    /// Returns `CalcError::Configuration` for a calculator built around a
    /// bespoke profile.
    pub fn add(&mut self, series: impl Into<Series>) -> CalcResult<()> {
        if self.is_bespoke {
            return Err(CalcError::configuration(
                "Series cannot be added to a calculator built from a user-defined profile.",
            ));
        }
        let mut series = series.into();
        if let Some(amount) = series.amount() {
            series.set_amount(Some(bankers_round(amount, self.precision)));
        }
        self.series.push(series);
        self.profile = None;
        Ok(())
    }

    /// Solves for the unknown value at `rate`.
    ///
    /// The unknown cash flows take the rounded result (times their
    /// weighting) and interest is then allocated to every payment.
    ///
    /// # Errors
    ///
    /// Returns `CalcError::Configuration` if the profile cannot be built and
    /// `CalcError::Convergence` if no solution is found.
    pub fn solve_value(&mut self, convention: Convention, rate: f64) -> CalcResult<f64> {
        let solver = self.solver;
        let precision = self.precision;
        let profile = self.ensure_profile()?;

        let result = {
            let mut objective = SolveCashFlow::new(&mut *profile, convention, rate);
            solve_root(&mut objective, &solver)?
        };
        let value = profile.update_values(result.root, true);
        profile.update_amort_int(rate);

        let value = bankers_round(value, precision);
        info!(
            convention = %convention,
            rate,
            value,
            iterations = result.iterations,
            "solved unknown value"
        );
        Ok(value)
    }

    /// Solves for the rate implicit in a fully known profile.
    ///
    /// The rate is returned unrounded as a decimal.
    ///
    /// # Errors
    ///
    /// Returns `CalcError::Configuration` if the profile cannot be built and
    /// `CalcError::Convergence` if no solution is found.
    pub fn solve_rate(&mut self, convention: Convention) -> CalcResult<f64> {
        let solver = self.solver;
        let profile = self.ensure_profile()?;

        let mut objective = SolveNfv::new(profile, convention);
        let result = solve_root(&mut objective, &solver)?;
        info!(
            convention = %convention,
            rate = result.root,
            iterations = result.iterations,
            "solved implicit rate"
        );
        Ok(result.root)
    }

    fn ensure_profile(&mut self) -> CalcResult<&mut Profile> {
        if self.profile.is_none() {
            let start = self.start_date.unwrap_or_else(Date::today);
            let cash_flows = CashFlowBuilder::build(&self.series, start)?;
            debug!(start = %start, cash_flows = cash_flows.len(), "building profile");
            self.profile = Some(Profile::new(cash_flows, self.precision)?);
        }
        self.profile
            .as_mut()
            .ok_or_else(|| CalcError::configuration("The profile has not been initialised yet."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{Mode, SeriesAdvance, SeriesPayment};
    use accrue_core::CashFlow;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_default_precision_accepted() {
        assert_eq!(Calculator::new(2).unwrap().precision(), 2);
        assert!(Calculator::new(1).is_err());
        assert!(Calculator::new(5).is_err());
    }

    #[test]
    fn test_bespoke_precision_wins() {
        let today = date(2020, 1, 1);
        let profile = Profile::new(
            vec![
                CashFlow::advance(today, None, None).unwrap(),
                CashFlow::payment(today, Some(100.0), true),
            ],
            4,
        )
        .unwrap();
        let calc = Calculator::with_profile(profile);
        assert_eq!(calc.precision(), 4);
        assert!(calc.profile().is_ok());
    }

    #[test]
    fn test_profile_not_initialised() {
        let err = Calculator::new(2).unwrap().profile().unwrap_err();
        assert!(err.to_string().contains("not been initialised"));
    }

    #[test]
    fn test_add_to_bespoke_profile_rejected() {
        let today = date(2020, 1, 1);
        let profile = Profile::new(
            vec![
                CashFlow::advance(today, None, Some(1000.0)).unwrap(),
                CashFlow::payment(today, None, true),
            ],
            2,
        )
        .unwrap();
        let mut calc = Calculator::with_profile(profile);
        assert!(matches!(
            calc.add(SeriesAdvance::new()),
            Err(CalcError::Configuration { .. })
        ));
    }

    #[test]
    fn test_add_rounds_amount() {
        let mut calc = Calculator::new(2).unwrap();
        calc.add(SeriesAdvance::new().with_amount(999.989)).unwrap();
        assert_eq!(calc.series()[0].amount(), Some(999.99));
    }

    #[test]
    fn test_add_discards_built_profile() {
        let mut calc = Calculator::new(2).unwrap().with_start_date(date(2019, 1, 1));
        calc.add(SeriesAdvance::new().with_amount(1000.0)).unwrap();
        calc.add(SeriesPayment::new().with_number_of(3).with_mode(Mode::Arrear))
            .unwrap();
        calc.solve_value(Convention::default(), 0.12).unwrap();
        assert_eq!(calc.profile().unwrap().cash_flows().len(), 4);

        calc.add(SeriesPayment::new().with_amount(10.0)).unwrap();
        assert!(calc.profile().is_err());
    }

    #[test]
    fn test_empty_calculator_cannot_solve() {
        let mut calc = Calculator::new(2).unwrap();
        let err = calc.solve_rate(Convention::default()).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }
}
