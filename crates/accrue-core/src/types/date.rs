//! Calendar date used by cash flows and day count conventions.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

use crate::error::{AccrueError, AccrueResult};

/// A calendar date with no time-of-day component.
///
/// Every cash flow date passes through this type, so values that carry a
/// time (a `DateTime`) are normalised to midnight UTC on conversion and
/// day differences are never affected by daylight-saving shifts.
///
/// # Example
///
/// ```rust
/// use accrue_core::types::Date;
///
/// let date = Date::from_ymd(2019, 1, 31).unwrap();
/// let next = date.add_months(1).unwrap();
/// assert_eq!(next, Date::from_ymd(2019, 2, 28).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `AccrueError::InvalidDate` if the date does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> AccrueResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| AccrueError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    pub fn parse(s: &str) -> AccrueResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| AccrueError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns today's date in UTC.
    #[must_use]
    pub fn today() -> Self {
        Date(Utc::now().date_naive())
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Checks if the date falls in a leap year.
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        self.0.leap_year()
    }

    /// Returns the number of days in the date's month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Returns the number of days in the date's year.
    #[must_use]
    pub fn days_in_year(&self) -> u32 {
        if self.is_leap_year() {
            366
        } else {
            365
        }
    }

    /// Returns 31 December of the date's year.
    #[must_use]
    pub fn year_end(&self) -> Self {
        NaiveDate::from_ymd_opt(self.year(), 12, 31).map_or(*self, Date)
    }

    /// Adds (or with a negative argument, subtracts) a number of days.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Adds a number of months, clamping to the last day of a short month.
    pub fn add_months(&self, months: i32) -> AccrueResult<Self> {
        self.add_months_with_day(months, None)
    }

    /// Adds a number of months, landing on `preferred_day` where possible.
    ///
    /// The preferred day replaces the current day before clamping, so a
    /// schedule anchored on the 31st returns to month end after passing
    /// through February. A preferred day of zero is ignored.
    pub fn add_months_with_day(
        &self,
        months: i32,
        preferred_day: Option<u32>,
    ) -> AccrueResult<Self> {
        let total_months = self.year() * 12 + self.month() as i32 - 1 + months;
        let new_year = total_months.div_euclid(12);
        let new_month = (total_months.rem_euclid(12) + 1) as u32;

        let day = preferred_day.filter(|d| *d > 0).unwrap_or_else(|| self.day());
        let new_day = day.min(days_in_month(new_year, new_month));

        Self::from_ymd(new_year, new_month, new_day)
    }

    /// Signed number of calendar days from `self` to `other`.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Unsigned number of calendar days between two dates, in either order.
    #[must_use]
    pub fn actual_days(&self, other: &Date) -> i64 {
        self.days_between(other).abs()
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

/// Returns true when `year` is a Gregorian leap year.
#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Returns true when any year in `from..=to` is a leap year.
#[must_use]
pub fn has_leap_year(from: i32, to: i32) -> bool {
    (from.min(to)..=from.max(to)).any(is_leap_year)
}

/// Returns the number of days in a month.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Date {
    /// Discards the time of day after converting to UTC.
    fn from(datetime: DateTime<Tz>) -> Self {
        Date(datetime.with_timezone(&Utc).date_naive())
    }
}

impl Sub for Date {
    type Output = i64;

    fn sub(self, other: Self) -> Self::Output {
        (self.0 - other.0).num_days()
    }
}

impl std::str::FromStr for Date {
    type Err = AccrueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
