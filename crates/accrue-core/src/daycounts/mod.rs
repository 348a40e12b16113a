//! Day count conventions for loan and lease schedules.
//!
//! A convention turns a pair of dates into a [`DayCountFactor`] and tells the
//! profile how it wants to be walked:
//!
//! - which date of a cash flow to measure from (posting or value date)
//! - whether non-financing charges take part in the calculation
//! - whether each interval is measured from the first drawdown
//!   ([`DayCountOrigin::Drawdown`], XIRR/APR style) or from the previous
//!   cash flow ([`DayCountOrigin::Neighbour`])
//!
//! # Supported Conventions
//!
//! - [`Act365`]: Actual/365 Fixed
//! - [`ActIsda`]: Actual/Actual ISDA, split at each year end
//! - [`Thirty360`]: 30/360 with US (bond basis) or European day adjustment
//! - [`Eu200848Ec`]: EU Consumer Credit Directive 2008/48/EC
//!
//! # Usage
//!
//! ```rust
//! use accrue_core::daycounts::{Convention, DayCount, DayCountOptions};
//! use accrue_core::types::Date;
//!
//! let dc = Convention::act_isda(DayCountOptions::default());
//! let start = Date::from_ymd(2020, 1, 28).unwrap();
//! let end = Date::from_ymd(2020, 2, 28).unwrap();
//!
//! let factor = dc.compute_factor(start, end);
//! assert_eq!(factor.to_string(), "(31/366) = 0.08469945");
//! ```
//!
//! Act/Actual ISDA and EU 2008/48/EC expect `start <= end`; Act/365 and
//! 30/360 measure an absolute distance and accept either order.

mod act365;
mod act_isda;
mod eu_2008_48_ec;
mod factor;
mod thirty360;

pub use act365::Act365;
pub use act_isda::ActIsda;
pub use eu_2008_48_ec::{Eu200848Ec, EuFrequency};
pub use factor::DayCountFactor;
pub use thirty360::{Thirty360, Thirty360Basis};

use serde::{Deserialize, Serialize};

use crate::types::Date;

/// Anchor date used when measuring a cash flow's period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayCountOrigin {
    /// Every period runs from the first drawdown (XIRR and APR).
    Drawdown,
    /// Every period runs from the previous cash flow.
    Neighbour,
}

/// Switches shared by the configurable conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DayCountOptions {
    /// Measure from posting dates (`true`) or value dates (`false`).
    pub use_posting_dates: bool,
    /// Include charges in the calculation.
    pub include_non_financing_flows: bool,
    /// Period anchor.
    pub origin: DayCountOrigin,
}

impl DayCountOptions {
    /// Builds options from the three switches used by callers.
    ///
    /// `use_xirr_method` selects [`DayCountOrigin::Drawdown`].
    #[must_use]
    pub const fn new(
        use_posting_dates: bool,
        include_non_financing_flows: bool,
        use_xirr_method: bool,
    ) -> Self {
        Self {
            use_posting_dates,
            include_non_financing_flows,
            origin: if use_xirr_method {
                DayCountOrigin::Drawdown
            } else {
                DayCountOrigin::Neighbour
            },
        }
    }
}

impl Default for DayCountOptions {
    fn default() -> Self {
        Self::new(true, false, false)
    }
}

/// Capability shared by every day count convention.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait DayCount: Send + Sync {
    /// Returns the name of the convention.
    fn name(&self) -> &'static str;

    /// Returns the switches this convention runs with.
    fn options(&self) -> DayCountOptions;

    /// Period anchor.
    fn origin(&self) -> DayCountOrigin {
        self.options().origin
    }

    /// Whether posting dates (rather than value dates) drive ordering and factors.
    fn use_posting_dates(&self) -> bool {
        self.options().use_posting_dates
    }

    /// Whether charges take part in the calculation.
    fn include_non_financing_flows(&self) -> bool {
        self.options().include_non_financing_flows
    }

    /// Computes the year fraction between two dates.
    fn compute_factor(&self, start: Date, end: Date) -> DayCountFactor;
}

/// A configured day count convention.
///
/// Closed set of variants so a profile can dispatch without boxing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convention {
    /// Actual/365 Fixed.
    Act365(Act365),
    /// Actual/Actual ISDA.
    ActIsda(ActIsda),
    /// 30/360, US or European basis.
    Thirty360(Thirty360),
    /// EU Consumer Credit Directive 2008/48/EC.
    Eu200848Ec(Eu200848Ec),
}

impl Convention {
    /// Actual/365 Fixed.
    #[must_use]
    pub const fn act_365(options: DayCountOptions) -> Self {
        Self::Act365(Act365::new(options))
    }

    /// Actual/Actual ISDA.
    #[must_use]
    pub const fn act_isda(options: DayCountOptions) -> Self {
        Self::ActIsda(ActIsda::new(options))
    }

    /// 30/360 US (bond basis).
    #[must_use]
    pub const fn thirty_360_us(options: DayCountOptions) -> Self {
        Self::Thirty360(Thirty360::new(Thirty360Basis::Us, options))
    }

    /// 30E/360 (European basis).
    #[must_use]
    pub const fn thirty_360_eu(options: DayCountOptions) -> Self {
        Self::Thirty360(Thirty360::new(Thirty360Basis::European, options))
    }

    /// EU 2008/48/EC with the given time period.
    #[must_use]
    pub const fn eu_2008_48_ec(frequency: EuFrequency) -> Self {
        Self::Eu200848Ec(Eu200848Ec::new(frequency))
    }

    /// Returns the convention family.
    #[must_use]
    pub const fn kind(&self) -> DayCountConvention {
        match self {
            Self::Act365(_) => DayCountConvention::Act365,
            Self::ActIsda(_) => DayCountConvention::ActActIsda,
            Self::Thirty360(dc) => match dc.basis() {
                Thirty360Basis::Us => DayCountConvention::Thirty360Us,
                Thirty360Basis::European => DayCountConvention::Thirty360E,
            },
            Self::Eu200848Ec(_) => DayCountConvention::Eu200848Ec,
        }
    }

    fn as_day_count(&self) -> &dyn DayCount {
        match self {
            Self::Act365(dc) => dc,
            Self::ActIsda(dc) => dc,
            Self::Thirty360(dc) => dc,
            Self::Eu200848Ec(dc) => dc,
        }
    }
}

impl Default for Convention {
    /// 30/360 US, posting dates, charges excluded, neighbour anchored.
    fn default() -> Self {
        Self::thirty_360_us(DayCountOptions::default())
    }
}

impl DayCount for Convention {
    fn name(&self) -> &'static str {
        self.as_day_count().name()
    }

    fn options(&self) -> DayCountOptions {
        self.as_day_count().options()
    }

    fn compute_factor(&self, start: Date, end: Date) -> DayCountFactor {
        self.as_day_count().compute_factor(start, end)
    }
}

impl std::fmt::Display for Convention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Convention family, selectable at runtime by name.
///
/// ```rust
/// use accrue_core::daycounts::{DayCountConvention, DayCountOptions, EuFrequency};
///
/// let kind: DayCountConvention = "act/act isda".parse().unwrap();
/// let convention = kind.configure(DayCountOptions::default(), EuFrequency::Month);
/// assert_eq!(convention.kind(), DayCountConvention::ActActIsda);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DayCountConvention {
    /// Actual/365 Fixed.
    Act365,
    /// Actual/Actual ISDA.
    ActActIsda,
    /// 30/360 US.
    #[default]
    Thirty360Us,
    /// 30E/360.
    Thirty360E,
    /// EU 2008/48/EC.
    Eu200848Ec,
}

impl DayCountConvention {
    /// Returns the canonical name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Act365 => "ACT/365",
            Self::ActActIsda => "ACT/ACT ISDA",
            Self::Thirty360Us => "30/360",
            Self::Thirty360E => "30E/360",
            Self::Eu200848Ec => "EU2008/48/EC",
        }
    }

    /// Returns all supported families.
    #[must_use]
    pub const fn all() -> &'static [DayCountConvention] {
        &[
            Self::Act365,
            Self::ActActIsda,
            Self::Thirty360Us,
            Self::Thirty360E,
            Self::Eu200848Ec,
        ]
    }

    /// Builds a configured convention.
    ///
    /// EU 2008/48/EC ignores `options` and reads `frequency`; every other
    /// family ignores `frequency`.
    #[must_use]
    pub const fn configure(self, options: DayCountOptions, frequency: EuFrequency) -> Convention {
        match self {
            Self::Act365 => Convention::act_365(options),
            Self::ActActIsda => Convention::act_isda(options),
            Self::Thirty360Us => Convention::thirty_360_us(options),
            Self::Thirty360E => Convention::thirty_360_eu(options),
            Self::Eu200848Ec => Convention::eu_2008_48_ec(frequency),
        }
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DayCountConvention {
    type Err = DayCountParseError;

    /// Accepts canonical names, enum-style names and common aliases,
    /// ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "ACT/365" | "ACT/365F" | "ACT/365 FIXED" | "ACTUAL/365" | "ACT365" => Ok(Self::Act365),

            "ACT/ACT" | "ACT/ACT ISDA" | "ACTUAL/ACTUAL" | "ACTUAL/ACTUAL ISDA" | "ACTACTISDA"
            | "ACTISDA" => Ok(Self::ActActIsda),

            "30/360" | "30/360 US" | "30U/360" | "BOND" | "US30360" | "THIRTY360US" => {
                Ok(Self::Thirty360Us)
            }

            "30E/360" | "30/360 EU" | "EUROBOND" | "EU30360" | "THIRTY360E" => Ok(Self::Thirty360E),

            "EU2008/48/EC" | "EU 2008/48/EC" | "2008/48/EC" | "EU200848EC" | "EU-CCD" => {
                Ok(Self::Eu200848Ec)
            }

            _ => Err(DayCountParseError(s.to_string())),
        }
    }
}

impl TryFrom<String> for DayCountConvention {
    type Error = DayCountParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DayCountConvention> for String {
    fn from(value: DayCountConvention) -> Self {
        value.name().to_string()
    }
}

/// Error type for parsing day count conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCountParseError(pub String);

impl std::fmt::Display for DayCountParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown day count convention: '{}'", self.0)
    }
}

impl std::error::Error for DayCountParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_default_options() {
        let options = DayCountOptions::default();
        assert!(options.use_posting_dates);
        assert!(!options.include_non_financing_flows);
        assert_eq!(options.origin, DayCountOrigin::Neighbour);
        assert_eq!(DayCountOptions::new(false, true, true).origin, DayCountOrigin::Drawdown);
    }

    #[test]
    fn test_default_convention_is_us_30_360() {
        let dc = Convention::default();
        assert_eq!(dc.kind(), DayCountConvention::Thirty360Us);
        assert_eq!(dc.name(), "30/360");
        assert_eq!(dc.origin(), DayCountOrigin::Neighbour);
    }

    #[test]
    fn test_convention_delegates_options() {
        let dc = Convention::act_365(DayCountOptions::new(false, true, true));
        assert!(!dc.use_posting_dates());
        assert!(dc.include_non_financing_flows());
        assert_eq!(dc.origin(), DayCountOrigin::Drawdown);
    }

    #[test]
    fn test_eu_directive_ignores_options() {
        let dc = DayCountConvention::Eu200848Ec
            .configure(DayCountOptions::new(false, false, false), EuFrequency::Week);
        assert!(dc.use_posting_dates());
        assert!(dc.include_non_financing_flows());
        assert_eq!(dc.origin(), DayCountOrigin::Drawdown);
    }

    #[test]
    fn test_same_interval_across_conventions() {
        let start = date(2019, 1, 28);
        let end = date(2019, 2, 28);
        let options = DayCountOptions::default();

        let factor = |convention: Convention| convention.compute_factor(start, end).factor();
        assert_eq!(factor(Convention::act_365(options)), 31.0 / 365.0);
        assert_eq!(factor(Convention::act_isda(options)), 31.0 / 365.0);
        assert_eq!(factor(Convention::thirty_360_us(options)), 30.0 / 360.0);
        assert_eq!(factor(Convention::thirty_360_eu(options)), 30.0 / 360.0);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "30/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Thirty360Us
        );
        assert_eq!(
            "30e/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Thirty360E
        );
        assert_eq!("ACT/365".parse::<DayCountConvention>().unwrap(), DayCountConvention::Act365);
        assert_eq!(
            "Actual/Actual ISDA".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::ActActIsda
        );
        assert_eq!(
            " eu2008/48/ec ".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Eu200848Ec
        );
        assert!("ACT/360".parse::<DayCountConvention>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for kind in DayCountConvention::all() {
            let parsed: DayCountConvention = kind.to_string().parse().unwrap();
            assert_eq!(*kind, parsed);
        }
    }

    #[test]
    fn test_serde_uses_names() {
        let json = serde_json::to_string(&DayCountConvention::ActActIsda).unwrap();
        assert_eq!(json, "\"ACT/ACT ISDA\"");
        let parsed: DayCountConvention = serde_json::from_str("\"30E/360\"").unwrap();
        assert_eq!(parsed, DayCountConvention::Thirty360E);
        assert!(serde_json::from_str::<DayCountConvention>("\"ACT/360\"").is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn offset(days: i64) -> Date {
            date(2015, 1, 1).add_days(days)
        }

        proptest! {
            #[test]
            fn act_isda_is_additive(a in 0i64..4000, b in 0i64..4000, c in 0i64..4000) {
                let mut days = [a, b, c];
                days.sort_unstable();
                let [a, b, c] = days.map(offset);
                let dc = Convention::act_isda(DayCountOptions::default());
                let whole = dc.compute_factor(a, c).factor();
                let split = dc.compute_factor(a, b).factor() + dc.compute_factor(b, c).factor();
                prop_assert!((whole - split).abs() < 1e-12);
            }

            #[test]
            fn act_365_is_symmetric(a in 0i64..4000, b in 0i64..4000) {
                let dc = Convention::act_365(DayCountOptions::default());
                let forward = dc.compute_factor(offset(a), offset(b)).factor();
                let backward = dc.compute_factor(offset(b), offset(a)).factor();
                prop_assert_eq!(forward, backward);
                prop_assert!(forward >= 0.0);
            }

            #[test]
            fn thirty_360_never_negative(a in 0i64..4000, b in 0i64..4000) {
                let (a, b) = (offset(a.min(b)), offset(a.max(b)));
                for dc in [
                    Convention::thirty_360_us(DayCountOptions::default()),
                    Convention::thirty_360_eu(DayCountOptions::default()),
                ] {
                    prop_assert!(dc.compute_factor(a, b).factor() >= 0.0);
                }
            }
        }
    }
}
