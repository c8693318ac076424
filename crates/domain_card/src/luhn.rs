//! Luhn checksum validation
//!
//! The Luhn algorithm catches simple transcription errors in numeric
//! identifiers. The last digit of a card number is a check digit computed
//! from all the others.

/// Validates a digit string with the Luhn checksum.
///
/// The final digit is the check digit. Walking the remaining digits from the
/// least-significant end, every other digit (starting with the one adjacent
/// to the check digit) is doubled, subtracting 9 when the double exceeds 9.
/// The string is valid iff the digit sum plus the check digit is divisible
/// by 10.
///
/// A string shorter than two characters cannot separate a check digit from a
/// body and is invalid, as is any input containing a non-digit byte.
///
/// # Example
///
/// ```rust
/// use domain_card::luhn_valid;
///
/// assert!(luhn_valid("4532015112830366"));
/// assert!(!luhn_valid("4532015112830367"));
/// ```
pub fn luhn_valid(digits: &str) -> bool {
    let bytes = digits.as_bytes();
    if bytes.len() < 2 || !bytes.iter().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let check_digit = u32::from(bytes[bytes.len() - 1] - b'0');
    let mut sum = 0u32;
    for (position, byte) in bytes[..bytes.len() - 1].iter().rev().enumerate() {
        let mut digit = u32::from(byte - b'0');
        if position % 2 == 0 {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
    }

    (sum + check_digit) % 10 == 0
}
