//! Temporal helpers for expiry-date arithmetic
//!
//! All date computations in CardWise use UTC. A card printed with an expiry
//! month is usable through the last calendar day of that month, so the
//! boundary that matters everywhere is the first day of the *following*
//! month.

use chrono::{Datelike, NaiveDate, Utc};

/// Returns the first day of the month after the given (year, month).
///
/// This is the exclusive upper bound of a card's validity: a card expiring
/// in `month`/`year` is valid on every date strictly before the returned
/// boundary.
///
/// Returns `None` when the month is outside `1..=12` or the resulting date
/// is unrepresentable.
pub fn first_day_of_following_month(year: i32, month: u32) -> Option<NaiveDate> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
}

/// Current UTC year.
pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Current UTC month (1-12).
pub fn current_month() -> u32 {
    Utc::now().month()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_mid_year() {
        assert_eq!(
            first_day_of_following_month(2025, 6),
            NaiveDate::from_ymd_opt(2025, 7, 1)
        );
    }

    #[test]
    fn test_boundary_december_rolls_year() {
        assert_eq!(
            first_day_of_following_month(2025, 12),
            NaiveDate::from_ymd_opt(2026, 1, 1)
        );
    }

    #[test]
    fn test_invalid_month_is_none() {
        assert_eq!(first_day_of_following_month(2025, 0), None);
        assert_eq!(first_day_of_following_month(2025, 13), None);
    }
}
