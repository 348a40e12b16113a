//! Series expansion.

use accrue_core::types::Date;
use accrue_core::CashFlow;
use tracing::debug;

use super::frequency::{Frequency, Mode};
use super::Series;
use crate::error::{CalcError, CalcResult};

/// Where the next undated series of each type begins.
#[derive(Debug, Clone, Copy)]
struct NextPeriod {
    advance: Date,
    payment: Date,
    charge: Date,
}

/// Expands series descriptors into concrete cash flows.
///
/// Dated series start on their own posting date and may overlap freely.
/// Undated series of the same type follow one another: each begins where
/// the period covered by the previous one ended, and the first begins at
/// the reference date. Month-based rolling keeps the day of the start date
/// (or of the reference date for undated series), so a series anchored on
/// the 31st stays on month ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct CashFlowBuilder;

impl CashFlowBuilder {
    /// Builds the cash flows for `series` in order.
    ///
    /// # Errors
    ///
    /// Returns `CalcError::Configuration` when the list is empty or a
    /// descriptor fails validation.
    pub fn build(series: &[Series], today: Date) -> CalcResult<Vec<CashFlow>> {
        if series.is_empty() {
            return Err(CalcError::configuration(
                "The cash flow series is empty. Build aborted.",
            ));
        }

        let mut next = NextPeriod {
            advance: today,
            payment: today,
            charge: today,
        };
        let mut cash_flows = Vec::new();

        for item in series {
            item.validate()?;
            match item {
                Series::Advance(s) => {
                    let (first, day) = anchor(s.posting_date, next.advance, today);
                    let mut posting = start_date(first, day, s.frequency, s.mode)?;
                    let (mut value, value_day) = match s.value_date {
                        Some(v) => (start_date(v, v.day(), s.frequency, s.mode)?, v.day()),
                        None => (posting, day),
                    };
                    for i in 0..s.number_of {
                        let cf = CashFlow::advance(posting, Some(value), s.amount)?
                            .with_weighting(s.weighting)?
                            .with_label(s.label.as_str());
                        cash_flows.push(cf);
                        if i + 1 < s.number_of {
                            posting = s.frequency.roll(posting, day)?;
                            value = s.frequency.roll(value, value_day)?;
                        }
                    }
                    if s.posting_date.is_none() {
                        next.advance = period_end(posting, day, s.frequency, s.mode)?;
                    }
                }
                Series::Payment(s) => {
                    let (first, day) = anchor(s.posting_date, next.payment, today);
                    let mut posting = start_date(first, day, s.frequency, s.mode)?;
                    for i in 0..s.number_of {
                        let cf = CashFlow::payment(posting, s.amount, s.is_interest_capitalised)
                            .with_weighting(s.weighting)?
                            .with_label(s.label.as_str());
                        cash_flows.push(cf);
                        if i + 1 < s.number_of {
                            posting = s.frequency.roll(posting, day)?;
                        }
                    }
                    if s.posting_date.is_none() {
                        next.payment = period_end(posting, day, s.frequency, s.mode)?;
                    }
                }
                Series::Charge(s) => {
                    let (first, day) = anchor(s.posting_date, next.charge, today);
                    let mut posting = start_date(first, day, s.frequency, s.mode)?;
                    for i in 0..s.number_of {
                        let cf = CashFlow::charge(posting, s.amount.unwrap_or(0.0))
                            .with_label(s.label.as_str());
                        cash_flows.push(cf);
                        if i + 1 < s.number_of {
                            posting = s.frequency.roll(posting, day)?;
                        }
                    }
                    if s.posting_date.is_none() {
                        next.charge = period_end(posting, day, s.frequency, s.mode)?;
                    }
                }
            }
        }

        debug!(
            series = series.len(),
            cash_flows = cash_flows.len(),
            "expanded cash flow series"
        );
        Ok(cash_flows)
    }
}

/// Start date and preferred day for a series.
fn anchor(posting_date: Option<Date>, next: Date, today: Date) -> (Date, u32) {
    match posting_date {
        Some(date) => (date, date.day()),
        None => (next, today.day()),
    }
}

fn start_date(date: Date, day: u32, frequency: Frequency, mode: Mode) -> CalcResult<Date> {
    match mode {
        Mode::Advance => Ok(date),
        Mode::Arrear => frequency.roll(date, day),
    }
}

/// End of the period covered by the last cash flow of a series.
fn period_end(last: Date, day: u32, frequency: Frequency, mode: Mode) -> CalcResult<Date> {
    match mode {
        Mode::Advance => frequency.roll(last, day),
        Mode::Arrear => Ok(last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{SeriesAdvance, SeriesCharge, SeriesPayment};

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn postings(cash_flows: &[CashFlow]) -> Vec<Date> {
        cash_flows.iter().map(CashFlow::posting_date).collect()
    }

    #[test]
    fn test_empty_series_rejected() {
        let err = CashFlowBuilder::build(&[], date(2020, 1, 1)).unwrap_err();
        assert!(err.to_string().contains("The cash flow series is empty"));
    }

    #[test]
    fn test_advance_mode_starts_on_reference_date() {
        let today = date(2020, 1, 15);
        let series = [SeriesPayment::new().with_number_of(3).into()];
        let flows = CashFlowBuilder::build(&series, today).unwrap();
        assert_eq!(
            postings(&flows),
            vec![date(2020, 1, 15), date(2020, 2, 15), date(2020, 3, 15)]
        );
        assert!(flows.iter().all(|cf| !cf.is_known()));
    }

    #[test]
    fn test_arrear_mode_rolls_first_date() {
        let today = date(2020, 1, 15);
        let series = [SeriesPayment::new()
            .with_number_of(2)
            .with_mode(Mode::Arrear)
            .with_frequency(Frequency::Quarterly)
            .into()];
        let flows = CashFlowBuilder::build(&series, today).unwrap();
        assert_eq!(postings(&flows), vec![date(2020, 4, 15), date(2020, 7, 15)]);
    }

    #[test]
    fn test_month_end_anchor_is_preserved() {
        let series = [SeriesPayment::new()
            .with_number_of(4)
            .with_posting_date(date(2019, 1, 31))
            .into()];
        let flows = CashFlowBuilder::build(&series, date(2000, 1, 1)).unwrap();
        assert_eq!(
            postings(&flows),
            vec![
                date(2019, 1, 31),
                date(2019, 2, 28),
                date(2019, 3, 31),
                date(2019, 4, 30)
            ]
        );
    }

    #[test]
    fn test_undated_series_chain_by_period() {
        let today = date(2020, 1, 10);
        let series: Vec<Series> = vec![
            SeriesPayment::new().with_number_of(2).with_amount(100.0).into(),
            SeriesPayment::new().with_number_of(2).with_amount(50.0).into(),
            SeriesPayment::new()
                .with_number_of(1)
                .with_amount(25.0)
                .with_mode(Mode::Arrear)
                .into(),
            SeriesPayment::new().with_amount(5.0).into(),
        ];
        let flows = CashFlowBuilder::build(&series, today).unwrap();
        assert_eq!(
            postings(&flows),
            vec![
                date(2020, 1, 10),
                date(2020, 2, 10),
                date(2020, 3, 10),
                date(2020, 4, 10),
                date(2020, 6, 10),
                date(2020, 6, 10),
            ]
        );
    }

    #[test]
    fn test_dated_series_do_not_move_the_chain() {
        let today = date(2020, 1, 10);
        let series: Vec<Series> = vec![
            SeriesCharge::new(10.0).with_posting_date(date(2021, 6, 1)).into(),
            SeriesCharge::new(20.0).into(),
        ];
        let flows = CashFlowBuilder::build(&series, today).unwrap();
        assert_eq!(postings(&flows), vec![date(2021, 6, 1), date(2020, 1, 10)]);
    }

    #[test]
    fn test_advance_value_dates_roll_in_parallel() {
        let series = [SeriesAdvance::new()
            .with_amount(500.0)
            .with_number_of(3)
            .with_posting_date(date(2020, 1, 31))
            .with_value_date(date(2020, 2, 15))
            .into()];
        let flows = CashFlowBuilder::build(&series, date(2000, 1, 1)).unwrap();
        let values: Vec<Date> = flows.iter().map(CashFlow::value_date).collect();
        assert_eq!(
            postings(&flows),
            vec![date(2020, 1, 31), date(2020, 2, 29), date(2020, 3, 31)]
        );
        assert_eq!(
            values,
            vec![date(2020, 2, 15), date(2020, 3, 15), date(2020, 4, 15)]
        );
        assert!(flows.iter().all(|cf| cf.value() == -500.0));
    }

    #[test]
    fn test_charge_without_amount_is_zero() {
        let mut charge = SeriesCharge::new(0.0);
        charge.amount = None;
        let flows = CashFlowBuilder::build(&[charge.into()], date(2020, 1, 1)).unwrap();
        assert!(flows[0].is_charge());
        assert!(flows[0].is_known());
        assert_eq!(flows[0].value(), 0.0);
    }

    #[test]
    fn test_labels_and_weightings_copied() {
        let series = [SeriesPayment::new()
            .with_label("Rental")
            .with_weighting(2.0)
            .with_interest_capitalised(false)
            .with_number_of(2)
            .into()];
        let flows = CashFlowBuilder::build(&series, date(2020, 1, 1)).unwrap();
        for cf in &flows {
            assert_eq!(cf.label(), "Rental");
            assert_eq!(cf.weighting(), 2.0);
            assert!(!cf.is_interest_capitalised());
        }
    }

    #[test]
    fn test_invalid_descriptor_aborts_build() {
        let series = [SeriesPayment::new().with_weighting(0.0).into()];
        let err = CashFlowBuilder::build(&series, date(2020, 1, 1)).unwrap_err();
        assert!(matches!(err, CalcError::Configuration { .. }));
    }
}
