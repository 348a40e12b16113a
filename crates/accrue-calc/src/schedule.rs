//! Amortisation schedule reporting.

use accrue_core::rounding::bankers_round;
use accrue_core::types::Date;
use accrue_core::{CashFlow, Profile};
use serde::Serialize;

/// One line of an amortisation schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleRow {
    /// Posting date.
    pub posting_date: Date,
    /// Value date.
    pub value_date: Date,
    /// Cash flow label.
    pub label: String,
    /// `Advance`, `Payment` or `Charge`.
    pub kind: &'static str,
    /// Signed cash flow value.
    pub value: f64,
    /// Interest allocated on this line.
    pub interest: f64,
    /// Movement in the capital balance.
    pub capital: f64,
    /// Capital balance after this line.
    pub balance: f64,
    /// Period factor derivation, empty when no factor is assigned.
    pub factor: String,
}

/// Totals across a schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScheduleTotals {
    /// Sum of advance values (negative).
    pub advances: f64,
    /// Sum of payment values.
    pub payments: f64,
    /// Sum of charge values.
    pub charges: f64,
    /// Sum of allocated interest.
    pub interest: f64,
}

/// Amortisation schedule of a solved profile.
///
/// Balances follow the lender's view: advances are negative and payments
/// pay them down. Charges are listed but never move the balance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    rows: Vec<ScheduleRow>,
    totals: ScheduleTotals,
}

impl Schedule {
    /// Builds the schedule from the profile's current order, values and
    /// interest. Run a solve (or `update_amort_int`) first.
    #[must_use]
    pub fn from_profile(profile: &Profile) -> Self {
        let precision = profile.precision();
        let mut balance = 0.0;
        let mut totals = ScheduleTotals::default();
        let mut rows = Vec::with_capacity(profile.cash_flows().len());

        for cf in profile.cash_flows() {
            let interest = cf.interest();
            let capital = if cf.is_charge() {
                0.0
            } else {
                bankers_round(cf.value() + interest, precision)
            };
            balance = bankers_round(balance + capital, precision);

            if cf.is_advance() {
                totals.advances += cf.value();
            } else if cf.is_payment() {
                totals.payments += cf.value();
            } else {
                totals.charges += cf.value();
            }
            totals.interest += interest;

            rows.push(row(cf, interest, capital, balance));
        }

        totals.advances = bankers_round(totals.advances, precision);
        totals.payments = bankers_round(totals.payments, precision);
        totals.charges = bankers_round(totals.charges, precision);
        totals.interest = bankers_round(totals.interest, precision);

        Self { rows, totals }
    }

    /// Rows in profile order.
    pub fn rows(&self) -> &[ScheduleRow] {
        &self.rows
    }

    /// Column totals.
    pub fn totals(&self) -> ScheduleTotals {
        self.totals
    }

    /// Balance after the last row.
    pub fn final_balance(&self) -> f64 {
        self.rows.last().map_or(0.0, |r| r.balance)
    }
}

fn row(cf: &CashFlow, interest: f64, capital: f64, balance: f64) -> ScheduleRow {
    ScheduleRow {
        posting_date: cf.posting_date(),
        value_date: cf.value_date(),
        label: cf.label().to_string(),
        kind: cf.kind().name(),
        value: cf.value(),
        interest,
        capital,
        balance,
        factor: cf
            .period_factor()
            .map(ToString::to_string)
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accrue_core::daycounts::Convention;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn solved_profile() -> Profile {
        let flows = vec![
            CashFlow::advance(date(2019, 1, 1), None, Some(1000.0)).unwrap(),
            CashFlow::charge(date(2019, 1, 1), 10.0).with_label("Fee"),
            CashFlow::payment(date(2019, 2, 1), Some(340.02), true),
            CashFlow::payment(date(2019, 3, 1), Some(340.02), true),
            CashFlow::payment(date(2019, 4, 1), Some(340.02), true),
        ];
        let mut profile = Profile::new(flows, 2).unwrap();
        profile.assign_factors(Convention::default());
        profile.update_amort_int(0.12);
        profile
    }

    #[test]
    fn test_balances_run_down_to_zero() {
        let schedule = Schedule::from_profile(&solved_profile());
        let balances: Vec<f64> = schedule.rows().iter().map(|r| r.balance).collect();
        assert_eq!(balances, vec![-1000.0, -1000.0, -669.98, -336.66, 0.0]);
        assert_eq!(schedule.final_balance(), 0.0);
    }

    #[test]
    fn test_charge_row_is_inert() {
        let schedule = Schedule::from_profile(&solved_profile());
        let charge = &schedule.rows()[1];
        assert_eq!(charge.kind, "Charge");
        assert_eq!(charge.label, "Fee");
        assert_eq!(charge.interest, 0.0);
        assert_eq!(charge.capital, 0.0);
    }

    #[test]
    fn test_totals() {
        let totals = Schedule::from_profile(&solved_profile()).totals();
        assert_eq!(totals.advances, -1000.0);
        assert_eq!(totals.payments, 1020.06);
        assert_eq!(totals.charges, 10.0);
        assert_eq!(totals.interest, -20.06);
        assert!((totals.advances + totals.payments + totals.interest).abs() < 1e-9);
    }

    #[test]
    fn test_factor_rendering() {
        let schedule = Schedule::from_profile(&solved_profile());
        assert_eq!(schedule.rows()[2].factor, "(30/360) = 0.08333333");
    }
}
