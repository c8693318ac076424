//! Card expiry validation
//!
//! A card is usable through the last calendar day of its printed expiry
//! month. The comparison clock is UTC throughout.

use chrono::{NaiveDate, Utc};

use core_kernel::temporal::first_day_of_following_month;

/// Returns true when a card with the given expiry month and year is still
/// usable today (UTC).
///
/// A card expiring this month stays valid until the month ends.
pub fn is_expiry_valid(month: u32, year: i32) -> bool {
    is_expiry_valid_on(month, year, Utc::now().date_naive())
}

/// Deterministic core of [`is_expiry_valid`] with an explicit `today`.
///
/// Valid iff `today` is strictly before the first day of the month after
/// expiry. Out-of-range months are invalid; this function never panics.
pub fn is_expiry_valid_on(month: u32, year: i32, today: NaiveDate) -> bool {
    match first_day_of_following_month(year, month) {
        Some(boundary) => today < boundary,
        None => false,
    }
}
