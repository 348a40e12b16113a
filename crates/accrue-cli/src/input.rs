//! Schedule input files.
//!
//! A file describes either recurring `series` or explicit `cash_flows`:
//!
//! ```yaml
//! start_date: 2019-01-01
//! precision: 2
//! series:
//!   - type: advance
//!     amount: 1000.0
//!   - type: payment
//!     number_of: 3
//!     mode: arrear
//! ```

use std::path::Path;

use accrue_calc::{CalcError, Calculator, Series};
use accrue_core::types::Date;
use accrue_core::{CashFlow, Profile};
use serde::Deserialize;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Parsed input file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleInput {
    /// Reference date for undated series.
    #[serde(default)]
    pub start_date: Option<Date>,
    /// Precision override.
    #[serde(default)]
    pub precision: Option<u32>,
    /// Recurring series.
    #[serde(default)]
    pub series: Vec<Series>,
    /// Explicit cash flows.
    #[serde(default)]
    pub cash_flows: Vec<CashFlowInput>,
}

fn default_weighting() -> f64 {
    1.0
}

fn default_capitalised() -> bool {
    true
}

/// One explicit cash flow.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CashFlowInput {
    /// Funds paid out.
    Advance {
        /// Drawdown date.
        posting_date: Date,
        /// Settlement date.
        #[serde(default)]
        value_date: Option<Date>,
        /// Amount, omitted when unknown.
        #[serde(default)]
        amount: Option<f64>,
        /// Weighting of an unknown amount.
        #[serde(default = "default_weighting")]
        weighting: f64,
        /// Annotation.
        #[serde(default)]
        label: String,
    },
    /// Funds received.
    Payment {
        /// Payment date.
        posting_date: Date,
        /// Amount, omitted when unknown.
        #[serde(default)]
        amount: Option<f64>,
        /// Weighting of an unknown amount.
        #[serde(default = "default_weighting")]
        weighting: f64,
        /// Whether interest is capitalised on this date.
        #[serde(default = "default_capitalised")]
        is_interest_capitalised: bool,
        /// Annotation.
        #[serde(default)]
        label: String,
    },
    /// Non-financing fee.
    Charge {
        /// Charge date.
        posting_date: Date,
        /// Amount.
        amount: f64,
        /// Annotation.
        #[serde(default)]
        label: String,
    },
}

impl CashFlowInput {
    fn into_cash_flow(self) -> CliResult<CashFlow> {
        let cash_flow = match self {
            Self::Advance {
                posting_date,
                value_date,
                amount,
                weighting,
                label,
            } => CashFlow::advance(posting_date, value_date, amount)
                .and_then(|cf| cf.with_weighting(weighting))
                .map(|cf| cf.with_label(label)),
            Self::Payment {
                posting_date,
                amount,
                weighting,
                is_interest_capitalised,
                label,
            } => CashFlow::payment(posting_date, amount, is_interest_capitalised)
                .with_weighting(weighting)
                .map(|cf| cf.with_label(label)),
            Self::Charge {
                posting_date,
                amount,
                label,
            } => Ok(CashFlow::charge(posting_date, amount).with_label(label)),
        };
        cash_flow.map_err(|e| CliError::Calculation(CalcError::from(e)))
    }
}

impl ScheduleInput {
    /// Reads a JSON or YAML file. `.json` files are parsed as JSON,
    /// anything else as YAML.
    pub fn from_path(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let input: Self = if is_json {
            serde_json::from_str(&text)?
        } else {
            serde_yaml::from_str(&text)?
        };
        debug!(
            path = %path.display(),
            series = input.series.len(),
            cash_flows = input.cash_flows.len(),
            "read schedule input"
        );
        Ok(input)
    }

    /// Builds a calculator from the input. The file's precision, when
    /// present, overrides `precision`.
    pub fn into_calculator(self, precision: u32) -> CliResult<Calculator> {
        let precision = self.precision.unwrap_or(precision);
        match (self.series.is_empty(), self.cash_flows.is_empty()) {
            (true, true) => Err(CliError::Input(
                "the input has neither `series` nor `cash_flows`".into(),
            )),
            (false, false) => Err(CliError::Input(
                "the input may contain `series` or `cash_flows`, not both".into(),
            )),
            (false, true) => {
                let mut calc = Calculator::new(precision)?;
                if let Some(start) = self.start_date {
                    calc = calc.with_start_date(start);
                }
                for series in self.series {
                    calc.add(series)?;
                }
                Ok(calc)
            }
            (true, false) => {
                let cash_flows = self
                    .cash_flows
                    .into_iter()
                    .map(CashFlowInput::into_cash_flow)
                    .collect::<CliResult<Vec<_>>>()?;
                let profile = Profile::new(cash_flows, precision).map_err(CalcError::from)?;
                Ok(Calculator::with_profile(profile))
            }
        }
    }
}
