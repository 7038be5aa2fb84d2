use chrono::{DateTime, Months, Utc};

use crate::errors::{ChargeError, Result};

/// Add calendar months to a date.
///
/// Uses chrono's month arithmetic: when the day of month does not exist in
/// the target month the result is clamped to that month's last day
/// (jan 31 + 1 month = feb 29 in a leap year).
pub fn add_months(date: DateTime<Utc>, months: u32) -> Result<DateTime<Utc>> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| ChargeError::InvalidDate {
            message: format!("{} + {} months is out of range", date, months),
        })
}

/// Whole days elapsed from `from` to `to`, truncated, zero when `to` precedes `from`.
pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> u32 {
    let days = (to - from).num_days();
    u32::try_from(days.max(0)).unwrap_or(u32::MAX)
}
