//! Test Fixtures
//!
//! Pre-built test data for common entities. Card numbers are the standard
//! published test numbers for each scheme; none belong to a real account.

use chrono::NaiveDate;
use core_kernel::temporal::current_year;

/// Known-good card numbers per network
pub struct CardNumberFixtures;

impl CardNumberFixtures {
    /// 16-digit Visa, Luhn-valid
    pub fn visa() -> &'static str {
        "4532015112830366"
    }

    /// 13-digit Visa, Luhn-valid
    pub fn visa_short() -> &'static str {
        "4222222222222"
    }

    /// Mastercard, Luhn-valid
    pub fn mastercard() -> &'static str {
        "5500005555555559"
    }

    /// American Express, Luhn-valid
    pub fn amex() -> &'static str {
        "378282246310005"
    }

    /// Diners Club, Luhn-valid
    pub fn diners() -> &'static str {
        "30569309025904"
    }

    /// RuPay-shaped 16-digit number, Luhn-valid
    pub fn rupay() -> &'static str {
        "6521111111111110"
    }

    /// Visa number with its check digit off by one
    pub fn visa_bad_checksum() -> &'static str {
        "4532015112830367"
    }

    /// Digits matching no supported network pattern
    pub fn unrecognized() -> &'static str {
        "9999999999999995"
    }
}

/// Common temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// An expiry year comfortably in the future
    pub fn future_year() -> i64 {
        i64::from(current_year()) + 3
    }

    /// An expiry year in the past
    pub fn past_year() -> i64 {
        i64::from(current_year()) - 1
    }

    /// A fixed offer start date
    pub fn offer_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid fixture date")
    }

    /// A fixed offer end date, after `offer_start`
    pub fn offer_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 31).expect("valid fixture date")
    }
}
