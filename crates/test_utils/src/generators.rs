//! Property-Based Test Generators
//!
//! Proptest strategies for generating random test data that maintains
//! domain invariants.

use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_card::{CardNetwork, OfferDraft};

use crate::fixtures::TemporalFixtures;

/// Appends the check digit that makes a digit body Luhn-valid
pub fn luhn_complete(body: &str) -> String {
    let mut sum = 0u32;
    for (position, byte) in body.as_bytes().iter().rev().enumerate() {
        let mut digit = u32::from(byte - b'0');
        if position % 2 == 0 {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
    }
    format!("{body}{}", (10 - (sum % 10)) % 10)
}

/// Strategy for a Luhn-valid card number of the given network
///
/// Covers the networks whose patterns are reachable in detection priority
/// order; Discover-shaped numbers classify as RuPay, so no Discover
/// strategy exists.
pub fn card_number_strategy(network: CardNetwork) -> BoxedStrategy<String> {
    match network {
        CardNetwork::Visa => "[0-9]{14}"
            .prop_map(|tail| luhn_complete(&format!("4{tail}")))
            .boxed(),
        CardNetwork::Mastercard => (1u8..=5, "[0-9]{13}")
            .prop_map(|(second, tail)| luhn_complete(&format!("5{second}{tail}")))
            .boxed(),
        CardNetwork::Amex => (prop_oneof![Just('4'), Just('7')], "[0-9]{12}")
            .prop_map(|(second, tail)| luhn_complete(&format!("3{second}{tail}")))
            .boxed(),
        CardNetwork::Rupay | CardNetwork::Discover => "[0-9]{14}"
            .prop_map(|tail| luhn_complete(&format!("6{tail}")))
            .boxed(),
        CardNetwork::Diners => (0u8..=5, "[0-9]{10}")
            .prop_map(|(third, tail)| luhn_complete(&format!("30{third}{tail}")))
            .boxed(),
    }
}

/// Strategy for any Luhn-valid number from a detectable network
pub fn any_card_number_strategy() -> BoxedStrategy<String> {
    prop_oneof![
        card_number_strategy(CardNetwork::Visa),
        card_number_strategy(CardNetwork::Mastercard),
        card_number_strategy(CardNetwork::Amex),
        card_number_strategy(CardNetwork::Rupay),
        card_number_strategy(CardNetwork::Diners),
    ]
    .boxed()
}

/// Strategy for valid percentages (0 to 100, two decimal places)
pub fn percentage_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..=10000u32).prop_map(|n| Decimal::new(i64::from(n), 2))
}

/// Strategy for positive Decimal amounts
pub fn positive_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64, 0u32..4u32).prop_map(|(m, s)| Decimal::new(m, s))
}

/// Strategy for offer types by wire name
pub fn offer_type_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("CASHBACK"),
        Just("REWARD_POINTS"),
        Just("MILES"),
        Just("DISCOUNT"),
    ]
}

/// Strategy for offer drafts that always validate cleanly
pub fn valid_offer_draft_strategy() -> impl Strategy<Value = OfferDraft> {
    (
        "[A-Za-z ]{3,20}",
        offer_type_strategy(),
        percentage_strategy(),
        proptest::option::of(positive_amount_strategy()),
        positive_amount_strategy(),
    )
        .prop_map(|(category, offer_type, percentage, max_amount, points)| {
            OfferDraft {
                merchant_category: Some(category),
                offer_type: Some(offer_type.to_string()),
                percentage: Some(percentage),
                max_amount,
                valid_from: Some(TemporalFixtures::offer_start()),
                // Only reward-point offers need the rate; harmless otherwise
                points_per_rupee: Some(points),
                ..OfferDraft::default()
            }
        })
}
