//! Advances, payments and charges.
//!
//! Amounts are signed from the lender's side: an advance is stored negative,
//! payments and charges positive. A cash flow created without an amount is
//! *unknown*; its value starts at zero and is written by the solver through
//! [`CashFlow::update_value`].

use serde::{Deserialize, Serialize};

use crate::daycounts::DayCountFactor;
use crate::error::{AccrueError, AccrueResult};
use crate::rounding::bankers_round;
use crate::types::Date;

/// Variant-specific state of a cash flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CashFlowKind {
    /// Money lent out.
    Advance,
    /// An interest-bearing repayment.
    Payment {
        /// Whether interest is added to capital on this payment's date.
        is_interest_capitalised: bool,
    },
    /// A non-financing fee.
    Charge,
}

impl CashFlowKind {
    /// Short name for reports.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Advance => "Advance",
            Self::Payment { .. } => "Payment",
            Self::Charge => "Charge",
        }
    }
}

/// A dated cash movement in a [`Profile`](crate::Profile).
#[derive(Debug, Clone, PartialEq)]
pub struct CashFlow {
    posting_date: Date,
    value_date: Date,
    value: f64,
    is_known: bool,
    weighting: f64,
    label: String,
    kind: CashFlowKind,
    interest: f64,
    period_factor: Option<DayCountFactor>,
}

impl CashFlow {
    fn new(
        posting_date: Date,
        value_date: Date,
        value: Option<f64>,
        kind: CashFlowKind,
    ) -> AccrueResult<Self> {
        if value_date < posting_date {
            return Err(AccrueError::invalid_date_range(posting_date, value_date));
        }
        Ok(Self {
            posting_date,
            value_date,
            value: value.unwrap_or(0.0),
            is_known: value.is_some(),
            weighting: 1.0,
            label: String::new(),
            kind,
            interest: 0.0,
            period_factor: None,
        })
    }

    /// Creates an advance.
    ///
    /// The value date defaults to the posting date. A known amount is stored
    /// as `-|value|`.
    ///
    /// # Errors
    ///
    /// Returns `AccrueError::InvalidDateRange` if `value_date` precedes
    /// `posting_date`.
    pub fn advance(
        posting_date: impl Into<Date>,
        value_date: Option<Date>,
        value: Option<f64>,
    ) -> AccrueResult<Self> {
        let posting_date = posting_date.into();
        Self::new(
            posting_date,
            value_date.unwrap_or(posting_date),
            value.map(|v| -v.abs()),
            CashFlowKind::Advance,
        )
    }

    /// Creates a payment; a known amount is stored as `+|value|`.
    pub fn payment(
        posting_date: impl Into<Date>,
        value: Option<f64>,
        is_interest_capitalised: bool,
    ) -> Self {
        let posting_date = posting_date.into();
        Self {
            posting_date,
            value_date: posting_date,
            value: value.map_or(0.0, f64::abs),
            is_known: value.is_some(),
            weighting: 1.0,
            label: String::new(),
            kind: CashFlowKind::Payment { is_interest_capitalised },
            interest: 0.0,
            period_factor: None,
        }
    }

    /// Creates a charge. Charges are always known.
    pub fn charge(posting_date: impl Into<Date>, value: f64) -> Self {
        let posting_date = posting_date.into();
        Self {
            posting_date,
            value_date: posting_date,
            value: value.abs(),
            is_known: true,
            weighting: 1.0,
            label: String::new(),
            kind: CashFlowKind::Charge,
            interest: 0.0,
            period_factor: None,
        }
    }

    /// Sets the multiplier applied to solved values.
    ///
    /// # Errors
    ///
    /// Returns `AccrueError::Configuration` unless `weighting` is finite and
    /// positive.
    pub fn with_weighting(mut self, weighting: f64) -> AccrueResult<Self> {
        if !(weighting.is_finite() && weighting > 0.0) {
            return Err(AccrueError::configuration(format!(
                "weighting must be greater than zero, got {weighting}"
            )));
        }
        self.weighting = weighting;
        Ok(self)
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Due date.
    pub fn posting_date(&self) -> Date {
        self.posting_date
    }

    /// Settlement date, never before the posting date.
    pub fn value_date(&self) -> Date {
        self.value_date
    }

    /// Returns the posting or value date.
    pub fn date(&self, use_posting_dates: bool) -> Date {
        if use_posting_dates {
            self.posting_date
        } else {
            self.value_date
        }
    }

    /// Signed amount.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// False while the amount is waiting to be solved.
    pub fn is_known(&self) -> bool {
        self.is_known
    }

    /// Multiplier applied to solved values.
    pub fn weighting(&self) -> f64 {
        self.weighting
    }

    /// Free-text description.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Variant-specific state.
    pub fn kind(&self) -> &CashFlowKind {
        &self.kind
    }

    /// True for advances.
    pub fn is_advance(&self) -> bool {
        matches!(self.kind, CashFlowKind::Advance)
    }

    /// True for payments.
    pub fn is_payment(&self) -> bool {
        matches!(self.kind, CashFlowKind::Payment { .. })
    }

    /// True for charges.
    pub fn is_charge(&self) -> bool {
        matches!(self.kind, CashFlowKind::Charge)
    }

    /// True for payments that capitalise interest; false for everything else.
    pub fn is_interest_capitalised(&self) -> bool {
        matches!(
            self.kind,
            CashFlowKind::Payment {
                is_interest_capitalised: true,
                ..
            }
        )
    }

    /// Interest allocated by amortisation.
    ///
    /// A payment holds the interest it settles. An advance drawn after the
    /// drawdown holds the interest accrued on the balance up to its date.
    /// Charges never carry interest.
    pub fn interest(&self) -> f64 {
        self.interest
    }

    pub(crate) fn set_interest(&mut self, value: f64) {
        if !self.is_charge() {
            self.interest = value;
        }
    }

    /// Period factor assigned by the last `Profile::assign_factors` call.
    pub fn period_factor(&self) -> Option<&DayCountFactor> {
        self.period_factor.as_ref()
    }

    /// Numeric period factor, zero before factors are assigned.
    pub fn factor(&self) -> f64 {
        self.period_factor.as_ref().map_or(0.0, DayCountFactor::factor)
    }

    pub(crate) fn set_period_factor(&mut self, factor: DayCountFactor) {
        self.period_factor = Some(factor);
    }

    /// Sets the amount to `value * weighting`, rounded when a precision is
    /// given. The known flag is unchanged.
    pub fn update_value(&mut self, value: f64, precision: Option<u32>) {
        let weighted = value * self.weighting;
        self.value = match precision {
            Some(precision) => bankers_round(weighted, precision),
            None => weighted,
        };
    }
}
