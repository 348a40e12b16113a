//! Domain value types.

mod date;

pub use date::{days_in_month, has_leap_year, is_leap_year, Date};
