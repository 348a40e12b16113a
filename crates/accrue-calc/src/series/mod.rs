//! Expansion of recurring series into dated cash flows.

mod builder;
mod descriptor;
mod frequency;

pub use builder::CashFlowBuilder;
pub use descriptor::{SeriesAdvance, SeriesCharge, SeriesPayment};
pub use frequency::{Frequency, Mode};

use serde::{Deserialize, Serialize};

use crate::error::CalcResult;

/// One recurring series of a single cash-flow type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Series {
    /// Advances paid out.
    Advance(SeriesAdvance),
    /// Payments received.
    Payment(SeriesPayment),
    /// Non-financing charges.
    Charge(SeriesCharge),
}

impl Series {
    /// Amount of each cash flow, if known.
    #[must_use]
    pub fn amount(&self) -> Option<f64> {
        match self {
            Self::Advance(s) => s.amount,
            Self::Payment(s) => s.amount,
            Self::Charge(s) => s.amount,
        }
    }

    /// Replaces the amount of each cash flow.
    pub fn set_amount(&mut self, amount: Option<f64>) {
        match self {
            Self::Advance(s) => s.amount = amount,
            Self::Payment(s) => s.amount = amount,
            Self::Charge(s) => s.amount = amount,
        }
    }

    /// Validates the underlying descriptor.
    pub fn validate(&self) -> CalcResult<()> {
        match self {
            Self::Advance(s) => s.validate(),
            Self::Payment(s) => s.validate(),
            Self::Charge(s) => s.validate(),
        }
    }
}

impl From<SeriesAdvance> for Series {
    fn from(series: SeriesAdvance) -> Self {
        Self::Advance(series)
    }
}

impl From<SeriesPayment> for Series {
    fn from(series: SeriesPayment) -> Self {
        Self::Payment(series)
    }
}

impl From<SeriesCharge> for Series {
    fn from(series: SeriesCharge) -> Self {
        Self::Charge(series)
    }
}
