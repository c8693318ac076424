//! Comprehensive unit tests for the Temporal module
//!
//! Tests cover the expiry-boundary computation across month and year
//! transitions, plus the wall-clock helpers.

use chrono::{Datelike, NaiveDate};
use core_kernel::{current_month, current_year, first_day_of_following_month};

mod boundary_tests {
    use super::*;

    #[test]
    fn test_every_valid_month_has_a_boundary() {
        for month in 1..=12 {
            assert!(
                first_day_of_following_month(2025, month).is_some(),
                "month {month} has no boundary"
            );
        }
    }

    #[test]
    fn test_boundary_is_first_of_next_month() {
        let boundary = first_day_of_following_month(2025, 3).unwrap();
        assert_eq!(boundary, NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
    }

    #[test]
    fn test_december_boundary_is_next_january() {
        let boundary = first_day_of_following_month(2024, 12).unwrap();
        assert_eq!(boundary.year(), 2025);
        assert_eq!(boundary.month(), 1);
        assert_eq!(boundary.day(), 1);
    }

    #[test]
    fn test_february_boundary_handles_leap_years() {
        // Boundary is March 1 regardless of leap status
        let leap = first_day_of_following_month(2024, 2).unwrap();
        let common = first_day_of_following_month(2025, 2).unwrap();
        assert_eq!(leap, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(common, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    }

    #[test]
    fn test_invalid_months_have_no_boundary() {
        assert!(first_day_of_following_month(2025, 0).is_none());
        assert!(first_day_of_following_month(2025, 13).is_none());
        assert!(first_day_of_following_month(2025, u32::MAX).is_none());
    }

    #[test]
    fn test_extreme_years_do_not_panic() {
        let _ = first_day_of_following_month(i32::MAX, 12);
        let _ = first_day_of_following_month(i32::MIN, 1);
    }
}

mod clock_tests {
    use super::*;

    #[test]
    fn test_current_month_is_in_range() {
        let month = current_month();
        assert!((1..=12).contains(&month));
    }

    #[test]
    fn test_current_year_is_plausible() {
        let year = current_year();
        assert!(year >= 2024);
    }
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn boundary_always_follows_the_month(year in 1970i32..2200, month in 1u32..=12) {
            let boundary = first_day_of_following_month(year, month).unwrap();
            let month_start = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
            prop_assert!(boundary > month_start);
            prop_assert_eq!(boundary.day(), 1);
        }
    }
}
