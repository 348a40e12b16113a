//! The validated cash-flow collection a solver works on.

use std::cmp::Ordering;

use tracing::debug;

use crate::cashflow::{CashFlow, CashFlowKind};
use crate::daycounts::{Convention, DayCount, DayCountOrigin};
use crate::error::{AccrueError, AccrueResult};
use crate::rounding::bankers_round;
use crate::types::Date;

/// Decimal precisions a profile may round to.
pub const SUPPORTED_PRECISIONS: [u32; 4] = [0, 2, 3, 4];

/// Checks that `precision` is one of [`SUPPORTED_PRECISIONS`].
pub fn validate_precision(precision: u32) -> AccrueResult<u32> {
    if SUPPORTED_PRECISIONS.contains(&precision) {
        Ok(precision)
    } else {
        Err(AccrueError::configuration(format!(
            "the precision of {precision} is unsupported, valid options are 0, 2, 3 or 4"
        )))
    }
}

/// An ordered collection of cash flows with its active convention.
///
/// The structural rules are checked once, in [`Profile::new`]:
///
/// 1. at least one advance, the earliest of which is the drawdown
/// 2. at least one payment
/// 3. unknown amounts on advances or on payments, never both
/// 4. at least one capitalising payment on the last payment date
///
/// Every [`assign_factors`](Profile::assign_factors) call re-sorts the
/// collection in place, so the order seen afterwards is not the order the
/// cash flows were supplied in.
#[derive(Debug, Clone)]
pub struct Profile {
    cash_flows: Vec<CashFlow>,
    day_count: Convention,
    drawdown_posting_date: Date,
    drawdown_value_date: Date,
    precision: u32,
}

impl Profile {
    /// Validates and wraps a finished set of cash flows.
    ///
    /// # Errors
    ///
    /// Returns `AccrueError::Configuration` naming the first rule broken.
    pub fn new(cash_flows: Vec<CashFlow>, precision: u32) -> AccrueResult<Self> {
        let precision = validate_precision(precision)?;
        if cash_flows.is_empty() {
            return Err(AccrueError::configuration(
                "the profile must contain at least one cash flow",
            ));
        }

        let drawdown = cash_flows
            .iter()
            .filter(|cf| cf.is_advance())
            .min_by(|a, b| {
                a.posting_date()
                    .cmp(&b.posting_date())
                    .then_with(|| a.value_date().cmp(&b.value_date()))
            })
            .ok_or_else(|| {
                AccrueError::configuration("the profile must contain at least one advance")
            })?;
        let (drawdown_posting_date, drawdown_value_date) =
            (drawdown.posting_date(), drawdown.value_date());

        let Some(last_payment_date) = cash_flows
            .iter()
            .filter(|cf| cf.is_payment())
            .map(CashFlow::posting_date)
            .max()
        else {
            return Err(AccrueError::configuration(
                "the profile must contain at least one payment",
            ));
        };

        let unknown_advances = cash_flows.iter().any(|cf| cf.is_advance() && !cf.is_known());
        let unknown_payments = cash_flows.iter().any(|cf| cf.is_payment() && !cf.is_known());
        if unknown_advances && unknown_payments {
            return Err(AccrueError::configuration(
                "unknown values may be held by advances or by payments, not both",
            ));
        }

        let last_capitalised = cash_flows.iter().any(|cf| {
            cf.is_payment()
                && cf.posting_date() == last_payment_date
                && cf.is_interest_capitalised()
        });
        if !last_capitalised {
            return Err(AccrueError::configuration(
                "a payment on the final payment date must capitalise interest",
            ));
        }

        debug!(
            cash_flows = cash_flows.len(),
            precision,
            drawdown = %drawdown_posting_date,
            "profile validated"
        );

        Ok(Self {
            cash_flows,
            day_count: Convention::default(),
            drawdown_posting_date,
            drawdown_value_date,
            precision,
        })
    }

    /// Cash flows in their current order.
    pub fn cash_flows(&self) -> &[CashFlow] {
        &self.cash_flows
    }

    /// Convention applied by the last `assign_factors` call.
    pub fn day_count(&self) -> Convention {
        self.day_count
    }

    /// Posting date of the first advance.
    pub fn drawdown_posting_date(&self) -> Date {
        self.drawdown_posting_date
    }

    /// Value date of the first advance.
    pub fn drawdown_value_date(&self) -> Date {
        self.drawdown_value_date
    }

    /// Rounding precision.
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// True if any cash flow is waiting for a solved value.
    pub fn has_unknowns(&self) -> bool {
        self.cash_flows.iter().any(|cf| !cf.is_known())
    }

    /// Sorts the cash flows for `convention` and assigns each its period factor.
    pub fn assign_factors(&mut self, convention: Convention) {
        self.day_count = convention;
        self.sort_cash_flows();
        self.compute_factors();
        debug!(convention = %convention, "period factors assigned");
    }

    /// Writes `value` into every unknown cash flow, rounding to the profile
    /// precision only when `is_rounded` is set. Returns `value`.
    ///
    /// Rounding is non-smooth, so solvers pass `false` while iterating.
    pub fn update_values(&mut self, value: f64, is_rounded: bool) -> f64 {
        let precision = is_rounded.then_some(self.precision);
        for cash_flow in self.cash_flows.iter_mut().filter(|cf| !cf.is_known()) {
            cash_flow.update_value(value, precision);
        }
        value
    }

    /// Allocates rounded interest at `rate`.
    ///
    /// Capitalising payments take the interest accrued since the previous
    /// capitalisation. Later advances take the interest accrued on the
    /// balance up to their own date. The rounding residue left on the capital
    /// balance is absorbed by the last payment, so the allocated interest
    /// reconciles the balance to zero.
    pub fn update_amort_int(&mut self, rate: f64) {
        let precision = self.precision;
        let mut capital_balance = 0.0;
        let mut accrued_interest = 0.0;

        for cash_flow in &mut self.cash_flows {
            if cash_flow.is_charge() {
                continue;
            }
            let period_interest =
                bankers_round(capital_balance * rate * cash_flow.factor(), precision);

            match *cash_flow.kind() {
                CashFlowKind::Payment {
                    is_interest_capitalised: true,
                    ..
                } => {
                    let interest = bankers_round(accrued_interest + period_interest, precision);
                    cash_flow.set_interest(interest);
                    capital_balance += interest + cash_flow.value();
                    accrued_interest = 0.0;
                }
                CashFlowKind::Payment { .. } => {
                    cash_flow.set_interest(0.0);
                    accrued_interest += period_interest;
                    capital_balance += cash_flow.value();
                }
                _ => {
                    cash_flow.set_interest(period_interest);
                    capital_balance += period_interest + cash_flow.value();
                }
            }
        }

        if let Some(last) = self.cash_flows.iter_mut().rev().find(|cf| cf.is_payment()) {
            let adjusted = bankers_round(last.interest() - capital_balance, precision);
            last.set_interest(adjusted);
        }
        debug!(rate, residue = capital_balance, "amortised interest allocated");
    }

    /// Date order, advances first on a shared date. Payments on a shared
    /// date are then re-slotted so uncapitalised ones precede capitalising
    /// ones; charges keep their supplied position relative to payments.
    fn sort_cash_flows(&mut self) {
        let use_posting_dates = self.day_count.use_posting_dates();
        self.cash_flows.sort_by(|a, b| {
            a.date(use_posting_dates)
                .cmp(&b.date(use_posting_dates))
                .then_with(|| b.is_advance().cmp(&a.is_advance()))
                .then_with(|| {
                    if a.is_advance() && b.is_advance() {
                        a.value_date().cmp(&b.value_date())
                    } else {
                        Ordering::Equal
                    }
                })
        });

        let mut start = 0;
        while start < self.cash_flows.len() {
            let date = self.cash_flows[start].date(use_posting_dates);
            let end = start
                + self.cash_flows[start..]
                    .iter()
                    .take_while(|cf| cf.date(use_posting_dates) == date)
                    .count();
            order_same_date_payments(&mut self.cash_flows[start..end]);
            start = end;
        }
    }

    fn compute_factors(&mut self) {
        let dc = self.day_count;
        let use_posting_dates = dc.use_posting_dates();
        let include_charges = dc.include_non_financing_flows();
        let drawdown_date = if use_posting_dates {
            self.drawdown_posting_date
        } else {
            self.drawdown_value_date
        };

        let Some(mut neighbour_date) = self.cash_flows.first().map(|cf| cf.date(use_posting_dates))
        else {
            return;
        };

        for cash_flow in &mut self.cash_flows {
            let date = cash_flow.date(use_posting_dates);

            let factor = if (cash_flow.is_charge() && !include_charges) || date <= drawdown_date {
                dc.compute_factor(date, date)
            } else {
                match dc.origin() {
                    DayCountOrigin::Drawdown => dc.compute_factor(drawdown_date, date),
                    DayCountOrigin::Neighbour => {
                        let factor = dc.compute_factor(neighbour_date, date);
                        neighbour_date = date;
                        factor
                    }
                }
            };
            cash_flow.set_period_factor(factor);
        }
    }
}

/// Stable-sorts the payments of one date group among the slots payments
/// already occupy, leaving every other entry where it is.
fn order_same_date_payments(group: &mut [CashFlow]) {
    let mut payments: Vec<CashFlow> = group
        .iter()
        .filter(|cf| cf.is_payment())
        .cloned()
        .collect();
    if payments.len() < 2 {
        return;
    }
    payments.sort_by_key(CashFlow::is_interest_capitalised);

    let slots = group.iter_mut().filter(|cf| cf.is_payment());
    for (slot, payment) in slots.zip(payments) {
        *slot = payment;
    }
}
