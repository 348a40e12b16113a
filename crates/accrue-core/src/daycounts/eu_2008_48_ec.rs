//! EU Consumer Credit Directive 2008/48/EC.

use serde::{Deserialize, Serialize};

use super::{DayCount, DayCountFactor, DayCountOptions, DayCountOrigin};
use crate::types::Date;

/// Time period used to count whole periods under 2008/48/EC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EuFrequency {
    /// Whole years of twelve months.
    Year,
    /// Whole calendar months.
    #[default]
    Month,
    /// Whole weeks of seven days.
    Week,
}

impl EuFrequency {
    /// Number of periods in a year.
    #[must_use]
    pub const fn periods_per_year(&self) -> i64 {
        match self {
            Self::Year => 1,
            Self::Month => 12,
            Self::Week => 52,
        }
    }

    fn step_back(self, date: Date) -> Option<Date> {
        match self {
            Self::Year => date.add_months(-12).ok(),
            Self::Month => date.add_months(-1).ok(),
            Self::Week => Some(date.add_days(-7)),
        }
    }
}

impl std::str::FromStr for EuFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "year" | "yearly" | "y" => Ok(Self::Year),
            "month" | "monthly" | "m" => Ok(Self::Month),
            "week" | "weekly" | "w" => Ok(Self::Week),
            _ => Err(format!("unknown time period: '{s}' (expected year, month or week)")),
        }
    }
}

/// EU 2008/48/EC APR convention.
///
/// Time is measured from the drawdown in whole periods counted backward
/// from the later date, plus the remaining days over the length of the year
/// that ends where the whole periods begin.
///
/// # Formula
///
/// $$\text{Factor} = \frac{\text{Whole periods}}{\text{Periods per year}} + \frac{\text{Remaining days}}{\text{Days in preceding year}}$$
///
/// Always uses posting dates, includes charges and anchors on the drawdown.
/// Expects `start <= end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Eu200848Ec {
    frequency: EuFrequency,
}

impl Eu200848Ec {
    /// Creates the convention counting in `frequency` periods.
    #[must_use]
    pub const fn new(frequency: EuFrequency) -> Self {
        Self { frequency }
    }

    /// Returns the period used for whole-period counting.
    #[must_use]
    pub const fn frequency(&self) -> EuFrequency {
        self.frequency
    }
}

impl DayCount for Eu200848Ec {
    fn name(&self) -> &'static str {
        "EU2008/48/EC"
    }

    fn options(&self) -> DayCountOptions {
        DayCountOptions {
            use_posting_dates: true,
            include_non_financing_flows: true,
            origin: DayCountOrigin::Drawdown,
        }
    }

    fn compute_factor(&self, start: Date, end: Date) -> DayCountFactor {
        let mut factor = DayCountFactor::new();

        let mut whole_periods = 0_i64;
        let mut period_start = end;
        while let Some(previous) = self
            .frequency
            .step_back(period_start)
            .filter(|d| *d >= start)
        {
            period_start = previous;
            whole_periods += 1;
        }

        let mut total = 0.0;
        if whole_periods > 0 {
            let periods_per_year = self.frequency.periods_per_year();
            total = whole_periods as f64 / periods_per_year as f64;
            factor.log_operands(whole_periods, periods_per_year);
        }

        let days = start.actual_days(&period_start);
        let year_start = period_start
            .add_months(-12)
            .unwrap_or_else(|_| period_start.add_days(-365));
        let basis = year_start.actual_days(&period_start);
        total += days as f64 / basis as f64;
        if days > 0 || factor.operands().is_empty() {
            factor.log_operands(days, basis);
        }

        factor.set_factor(total);
        factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn monthly() -> Eu200848Ec {
        Eu200848Ec::new(EuFrequency::Month)
    }

    #[test]
    fn test_fixed_options() {
        let dc = Eu200848Ec::default();
        assert!(dc.use_posting_dates());
        assert!(dc.include_non_financing_flows());
        assert_eq!(dc.origin(), DayCountOrigin::Drawdown);
        assert_eq!(dc.frequency(), EuFrequency::Month);
    }

    #[test]
    fn test_month_with_remainder() {
        let factor = monthly().compute_factor(date(2012, 1, 12), date(2012, 2, 15));
        assert_eq!(factor.factor(), 0.0915525114155251);
        assert_eq!(factor.operands(), &[(1, 12), (3, 365)]);

        let factor = monthly().compute_factor(date(2013, 1, 12), date(2013, 2, 15));
        assert_eq!(factor.factor(), 0.09153005464480873);
        assert_eq!(factor.operands(), &[(1, 12), (3, 366)]);
    }

    #[test]
    fn test_month_end_drift() {
        let factor = monthly().compute_factor(date(2013, 2, 26), date(2013, 3, 29));
        assert_eq!(factor.factor(), 0.08879781420765027);
    }

    #[test]
    fn test_same_day_logs_zero() {
        let factor = monthly().compute_factor(date(2012, 1, 12), date(2012, 1, 12));
        assert_eq!(factor.factor(), 0.0);
        assert_eq!(factor.to_string(), "(0/365) = 0.00000000");
    }

    #[test]
    fn test_yearly() {
        let dc = Eu200848Ec::new(EuFrequency::Year);
        let factor = |from, to| dc.compute_factor(from, to).factor();
        assert_eq!(factor(date(2012, 1, 12), date(2013, 2, 15)), 1.093150684931507);
        assert_eq!(factor(date(2020, 1, 1), date(2021, 3, 15)), 1.2021857923497268);
    }

    #[test]
    fn test_weekly() {
        let dc = Eu200848Ec::new(EuFrequency::Week);
        let factor = dc.compute_factor(date(2012, 1, 12), date(2012, 1, 26));
        assert_eq!(factor.factor(), 0.038461538461538464);
        assert_eq!(factor.operands(), &[(2, 52)]);

        let factor = dc.compute_factor(date(2012, 1, 12), date(2012, 1, 30));
        assert_eq!(factor.factor(), 0.0494204425711275);
        let factor = dc.compute_factor(date(2012, 1, 12), date(2013, 1, 12));
        assert_eq!(factor.factor(), 1.0054794520547945);
    }

    #[test]
    fn test_frequency_from_str() {
        assert_eq!("Week".parse::<EuFrequency>().unwrap(), EuFrequency::Week);
        assert_eq!("yearly".parse::<EuFrequency>().unwrap(), EuFrequency::Year);
        assert!("day".parse::<EuFrequency>().is_err());
    }
}
