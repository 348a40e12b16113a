//! Recurring cash-flow descriptors.
//!
//! Each descriptor stands for `number_of` cash flows of one type, spaced by
//! `frequency`. Fields left out of a serialized descriptor take their
//! defaults, so a minimal JSON payment series is `{"type": "payment"}`.

use accrue_core::types::Date;
use serde::{Deserialize, Serialize};

use super::frequency::{Frequency, Mode};
use crate::error::{CalcError, CalcResult};

fn check_number_of(number_of: u32) -> CalcResult<()> {
    if number_of < 1 {
        return Err(CalcError::configuration("the series number_of must be 1 or greater"));
    }
    Ok(())
}

fn check_weighting(weighting: f64, series: &str) -> CalcResult<()> {
    if !(weighting.is_finite() && weighting > 0.0) {
        return Err(CalcError::configuration(format!(
            "the {series} weighting must be greater than 0"
        )));
    }
    Ok(())
}

/// A series of advances paid out by the lender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesAdvance {
    /// Annotation copied onto every cash flow.
    pub label: String,
    /// Amount of each advance, `None` when it is to be solved.
    pub amount: Option<f64>,
    /// Number of advances.
    pub number_of: u32,
    /// Interval between advances.
    pub frequency: Frequency,
    /// Start or end of each interval.
    pub mode: Mode,
    /// Drawdown date of the first advance. Derived when absent.
    pub posting_date: Option<Date>,
    /// Settlement date of the first advance, on or after `posting_date`.
    pub value_date: Option<Date>,
    /// Weight of unknown values relative to other unknowns.
    pub weighting: f64,
}

impl Default for SeriesAdvance {
    fn default() -> Self {
        Self {
            label: String::new(),
            amount: None,
            number_of: 1,
            frequency: Frequency::default(),
            mode: Mode::default(),
            posting_date: None,
            value_date: None,
            weighting: 1.0,
        }
    }
}

impl SeriesAdvance {
    /// Creates a single unknown advance starting at the reference date.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets a known amount.
    #[must_use]
    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Sets the number of advances.
    #[must_use]
    pub fn with_number_of(mut self, number_of: u32) -> Self {
        self.number_of = number_of;
        self
    }

    /// Sets the frequency.
    #[must_use]
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the mode.
    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the drawdown date of the first advance.
    #[must_use]
    pub fn with_posting_date(mut self, date: Date) -> Self {
        self.posting_date = Some(date);
        self
    }

    /// Sets the settlement date of the first advance.
    #[must_use]
    pub fn with_value_date(mut self, date: Date) -> Self {
        self.value_date = Some(date);
        self
    }

    /// Sets the weighting.
    #[must_use]
    pub fn with_weighting(mut self, weighting: f64) -> Self {
        self.weighting = weighting;
        self
    }

    /// Checks the count, weighting and date pairing.
    pub fn validate(&self) -> CalcResult<()> {
        check_number_of(self.number_of)?;
        check_weighting(self.weighting, "advance series")?;
        match (self.posting_date, self.value_date) {
            (None, Some(_)) => Err(CalcError::configuration(
                "The Advance drawdown date must be entered when a settlement date is defined.",
            )),
            (Some(posting), Some(value)) if value < posting => Err(CalcError::configuration(
                "The Advance settlement date must fall on or after the drawdown date.",
            )),
            _ => Ok(()),
        }
    }
}

/// A series of payments received by the lender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesPayment {
    /// Annotation copied onto every cash flow.
    pub label: String,
    /// Amount of each payment, `None` when it is to be solved.
    pub amount: Option<f64>,
    /// Number of payments.
    pub number_of: u32,
    /// Interval between payments.
    pub frequency: Frequency,
    /// Start or end of each interval.
    pub mode: Mode,
    /// Date of the first payment. Derived when absent.
    pub posting_date: Option<Date>,
    /// Weight of unknown values relative to other unknowns.
    pub weighting: f64,
    /// Whether accrued interest is added to the balance on each payment date.
    pub is_interest_capitalised: bool,
}

impl Default for SeriesPayment {
    fn default() -> Self {
        Self {
            label: String::new(),
            amount: None,
            number_of: 1,
            frequency: Frequency::default(),
            mode: Mode::default(),
            posting_date: None,
            weighting: 1.0,
            is_interest_capitalised: true,
        }
    }
}

impl SeriesPayment {
    /// Creates a single unknown payment starting at the reference date.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets a known amount.
    #[must_use]
    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Sets the number of payments.
    #[must_use]
    pub fn with_number_of(mut self, number_of: u32) -> Self {
        self.number_of = number_of;
        self
    }

    /// Sets the frequency.
    #[must_use]
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the mode.
    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the date of the first payment.
    #[must_use]
    pub fn with_posting_date(mut self, date: Date) -> Self {
        self.posting_date = Some(date);
        self
    }

    /// Sets the weighting.
    #[must_use]
    pub fn with_weighting(mut self, weighting: f64) -> Self {
        self.weighting = weighting;
        self
    }

    /// Sets whether interest is capitalised on each payment.
    #[must_use]
    pub fn with_interest_capitalised(mut self, capitalised: bool) -> Self {
        self.is_interest_capitalised = capitalised;
        self
    }

    /// Checks the count and weighting.
    pub fn validate(&self) -> CalcResult<()> {
        check_number_of(self.number_of)?;
        check_weighting(self.weighting, "payment series")
    }
}

/// A series of non-financing charges such as arrangement fees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesCharge {
    /// Annotation copied onto every cash flow.
    pub label: String,
    /// Amount of each charge. Charges are never solved, so `None` means 0.
    pub amount: Option<f64>,
    /// Number of charges.
    pub number_of: u32,
    /// Interval between charges.
    pub frequency: Frequency,
    /// Start or end of each interval.
    pub mode: Mode,
    /// Date of the first charge. Derived when absent.
    pub posting_date: Option<Date>,
}

impl Default for SeriesCharge {
    fn default() -> Self {
        Self {
            label: String::new(),
            amount: None,
            number_of: 1,
            frequency: Frequency::default(),
            mode: Mode::default(),
            posting_date: None,
        }
    }
}

impl SeriesCharge {
    /// Creates a single charge of `amount` starting at the reference date.
    #[must_use]
    pub fn new(amount: f64) -> Self {
        Self {
            amount: Some(amount),
            ..Self::default()
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the number of charges.
    #[must_use]
    pub fn with_number_of(mut self, number_of: u32) -> Self {
        self.number_of = number_of;
        self
    }

    /// Sets the frequency.
    #[must_use]
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the mode.
    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the date of the first charge.
    #[must_use]
    pub fn with_posting_date(mut self, date: Date) -> Self {
        self.posting_date = Some(date);
        self
    }

    /// Checks the count.
    pub fn validate(&self) -> CalcResult<()> {
        check_number_of(self.number_of)
    }
}
