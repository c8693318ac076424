//! Card network detection
//!
//! Classifies a card number into its issuing payment scheme from the number's
//! prefix and length, and computes its Luhn validity. Detection is a pure
//! function over the normalized digits; nothing here is cached between calls
//! except the compiled pattern table.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CardError;
use crate::luhn::luhn_valid;

/// The issuing payment scheme, inferable from a card number's prefix/length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardNetwork {
    Visa,
    Mastercard,
    Amex,
    Rupay,
    Diners,
    Discover,
}

impl CardNetwork {
    /// All supported networks, in detection priority order.
    pub const ALL: [CardNetwork; 6] = [
        CardNetwork::Visa,
        CardNetwork::Mastercard,
        CardNetwork::Amex,
        CardNetwork::Rupay,
        CardNetwork::Diners,
        CardNetwork::Discover,
    ];

    /// The wire/storage name of this network.
    pub fn as_str(&self) -> &'static str {
        match self {
            CardNetwork::Visa => "VISA",
            CardNetwork::Mastercard => "MASTERCARD",
            CardNetwork::Amex => "AMEX",
            CardNetwork::Rupay => "RUPAY",
            CardNetwork::Diners => "DINERS",
            CardNetwork::Discover => "DISCOVER",
        }
    }
}

impl fmt::Display for CardNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardNetwork {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VISA" => Ok(CardNetwork::Visa),
            "MASTERCARD" => Ok(CardNetwork::Mastercard),
            "AMEX" => Ok(CardNetwork::Amex),
            "RUPAY" => Ok(CardNetwork::Rupay),
            "DINERS" => Ok(CardNetwork::Diners),
            "DISCOVER" => Ok(CardNetwork::Discover),
            other => Err(CardError::UnknownNetwork(other.to_string())),
        }
    }
}

/// Prefix/length patterns per network, in detection priority order.
///
/// The first matching pattern wins, so the order here is part of the
/// detection contract. RuPay's broad `6` prefix sits before Discover's,
/// matching the order the issuing rules were originally defined in.
static CARD_PATTERNS: Lazy<Vec<(CardNetwork, Regex)>> = Lazy::new(|| {
    [
        (CardNetwork::Visa, r"^4[0-9]{12}(?:[0-9]{3})?$"),
        (CardNetwork::Mastercard, r"^5[1-5][0-9]{14}$"),
        (CardNetwork::Amex, r"^3[47][0-9]{13}$"),
        (CardNetwork::Rupay, r"^6[0-9]{15}$"),
        (CardNetwork::Diners, r"^3(?:0[0-5]|[68][0-9])[0-9]{11}$"),
        (CardNetwork::Discover, r"^6(?:011|5[0-9]{2})[0-9]{12}$"),
    ]
    .into_iter()
    .map(|(network, pattern)| {
        let regex = Regex::new(pattern).expect("card network pattern must compile");
        (network, regex)
    })
    .collect()
});

/// Result of sniffing a raw card number.
///
/// Computed fresh from the raw string on every call; never persisted and
/// carries no identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardNumberInfo {
    /// The detected network, or `None` when no pattern matches.
    pub network: Option<CardNetwork>,
    /// Luhn checksum result for the normalized digits.
    pub luhn_valid: bool,
}

/// Strips every non-digit character from a raw card number.
pub fn normalize_card_number(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Detects the card network and checksum validity of a raw card number.
///
/// The input is normalized by stripping every non-digit character, then
/// tested against each network pattern in priority order. `luhn_valid` is
/// always computed from the checksum, never inferred from a pattern match.
///
/// Never fails: an unrecognized or empty number yields
/// `CardNumberInfo { network: None, luhn_valid: false }`.
pub fn detect_card_network(raw: &str) -> CardNumberInfo {
    let normalized = normalize_card_number(raw);
    let network = CARD_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(&normalized))
        .map(|(network, _)| *network);

    CardNumberInfo {
        network,
        luhn_valid: luhn_valid(&normalized),
    }
}

/// Formats a card number for display.
///
/// Amex numbers group 4-6-5; every other network groups in blocks of four,
/// with any remainder trailing.
pub fn format_card_number(raw: &str, network: CardNetwork) -> String {
    let normalized = normalize_card_number(raw);

    if network == CardNetwork::Amex && normalized.len() == 15 {
        return format!(
            "{} {} {}",
            &normalized[..4],
            &normalized[4..10],
            &normalized[10..]
        );
    }

    normalized
        .as_bytes()
        .chunks(4)
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_visa_16_digit() {
        let info = detect_card_network("4532015112830366");
        assert_eq!(info.network, Some(CardNetwork::Visa));
        assert!(info.luhn_valid);
    }

    #[test]
    fn test_detects_visa_13_digit() {
        let info = detect_card_network("4222222222222");
        assert_eq!(info.network, Some(CardNetwork::Visa));
    }

    #[test]
    fn test_detects_mastercard() {
        let info = detect_card_network("5500005555555559");
        assert_eq!(info.network, Some(CardNetwork::Mastercard));
        assert!(info.luhn_valid);
    }

    #[test]
    fn test_detects_amex() {
        let info = detect_card_network("378282246310005");
        assert_eq!(info.network, Some(CardNetwork::Amex));
        assert!(info.luhn_valid);
    }

    #[test]
    fn test_detects_diners() {
        let info = detect_card_network("30569309025904");
        assert_eq!(info.network, Some(CardNetwork::Diners));
        assert!(info.luhn_valid);
    }

    #[test]
    fn test_rupay_prefix_wins_over_discover() {
        // 6011... is Discover territory, but the 16-digit RuPay pattern
        // sits earlier in the priority order and claims it first.
        let info = detect_card_network("6011111111111117");
        assert_eq!(info.network, Some(CardNetwork::Rupay));
        assert!(info.luhn_valid);
    }

    #[test]
    fn test_normalization_strips_separators() {
        let info = detect_card_network("4532 0151 1283 0366");
        assert_eq!(info.network, Some(CardNetwork::Visa));
        assert!(info.luhn_valid);
    }

    #[test]
    fn test_unrecognized_pattern_has_no_network() {
        let info = detect_card_network("9999999999999999");
        assert_eq!(info.network, None);
    }

    #[test]
    fn test_luhn_computed_even_without_network_match() {
        // 17 digits matches no pattern; checksum still runs on the digits
        let info = detect_card_network("45320151128303667");
        assert_eq!(info.network, None);
        assert!(!info.luhn_valid);
    }

    #[test]
    fn test_empty_input() {
        let info = detect_card_network("");
        assert_eq!(info.network, None);
        assert!(!info.luhn_valid);
    }

    #[test]
    fn test_network_parse_round_trip() {
        for network in CardNetwork::ALL {
            let parsed: CardNetwork = network.as_str().parse().unwrap();
            assert_eq!(parsed, network);
        }
        assert!("visa".parse::<CardNetwork>().is_err());
    }

    #[test]
    fn test_format_default_grouping() {
        assert_eq!(
            format_card_number("4532015112830366", CardNetwork::Visa),
            "4532 0151 1283 0366"
        );
    }

    #[test]
    fn test_format_amex_grouping() {
        assert_eq!(
            format_card_number("378282246310005", CardNetwork::Amex),
            "3782 822463 10005"
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn detection_never_panics(raw in ".{0,40}") {
                let _ = detect_card_network(&raw);
            }

            #[test]
            fn visa_prefix_16_digits_classifies_as_visa(tail in "[0-9]{15}") {
                let number = format!("4{tail}");
                let info = detect_card_network(&number);
                prop_assert_eq!(info.network, Some(CardNetwork::Visa));
            }
        }
    }
}
