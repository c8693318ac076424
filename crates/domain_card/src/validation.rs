//! Card payload validation
//!
//! This module provides the orchestrating validator for card create/update
//! payloads, ensuring data integrity before anything is persisted.
//!
//! # Validation Rules
//!
//! - Card name required, at least 3 characters
//! - Bank name required
//! - Full card number required: 12-19 digits after stripping separators,
//!   passing the Luhn checksum (only the last four digits are stored)
//! - Declared network required and cross-checked against the number
//! - Card type required (`CREDIT` or `DEBIT`)
//! - Expiry month 1-12, expiry year not in the past, card not expired -
//!   three independent checks that can all fire at once
//! - Credit limit positive when present
//! - At least one offer, each offer validated in turn
//!
//! Every check runs; failures accumulate in a fixed order and never
//! short-circuit, so a caller can surface the complete list in one pass.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::temporal::current_year;

use crate::card::{CardDraft, CardType};
use crate::expiry::is_expiry_valid;
use crate::network::{detect_card_network, normalize_card_number, CardNetwork, CardNumberInfo};
use crate::offer::validate_offer;

/// A single field-level validation failure.
///
/// `field` is a dotted/bracketed path (for example `offers[0].percentage`)
/// that callers map back onto form fields. Constructed by the validator that
/// detects the problem and consumed by the caller for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// The complete, ordered list of validation failures for one payload.
///
/// Carries exactly the data the plain [`validate_card_data`] list does, for
/// callers that prefer `Result` composition over inspecting a `Vec`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("Validation failed")]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![ValidationError::new(field, message)],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }
}

/// Validates a complete card payload.
///
/// Runs every field check and every per-offer check, accumulating failures
/// into one flat list. Errors appear in field order (name, bank, number,
/// network, type, expiry, credit limit), then offers in array order, then
/// per-offer checks in their fixed order - callers mapping errors onto form
/// fields may rely on this ordering. An empty list means the payload is
/// valid.
pub fn validate_card_data(data: &CardDraft) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // Card name
    match data.name.as_deref().map(str::trim) {
        None | Some("") => errors.push(ValidationError::new("name", "Card name is required")),
        Some(name) if name.chars().count() < 3 => errors.push(ValidationError::new(
            "name",
            "Card name must be at least 3 characters long",
        )),
        Some(_) => {}
    }

    // Bank name
    match data.bank_name.as_deref().map(str::trim) {
        None | Some("") => {
            errors.push(ValidationError::new("bankName", "Bank name is required"));
        }
        Some(_) => {}
    }

    // Card number: the full number is required; only the last four digits
    // are retained for display after validation
    let normalized = data
        .card_number
        .as_deref()
        .map(normalize_card_number)
        .filter(|digits| !digits.is_empty());
    let mut detected: Option<CardNumberInfo> = None;
    match normalized.as_deref() {
        None => errors.push(ValidationError::new(
            "cardNumber",
            "Card number is required",
        )),
        Some(digits) => {
            let info = detect_card_network(digits);
            if !(12..=19).contains(&digits.len()) {
                errors.push(ValidationError::new(
                    "cardNumber",
                    "Card number must be between 12 and 19 digits",
                ));
            } else if !info.luhn_valid {
                errors.push(ValidationError::new(
                    "cardNumber",
                    "Card number failed checksum validation",
                ));
            }
            detected = Some(info);
        }
    }

    // Declared network, cross-checked against the number when one is present
    match data.card_network.as_deref() {
        None | Some("") => errors.push(ValidationError::new(
            "cardNetwork",
            "Card network is required",
        )),
        Some(raw) => match raw.parse::<CardNetwork>() {
            Err(_) => errors.push(ValidationError::new("cardNetwork", "Invalid card network")),
            Ok(declared) => match detected {
                Some(CardNumberInfo { network: None, .. }) => {
                    errors.push(ValidationError::new(
                        "cardNetwork",
                        "Card number does not match any supported network",
                    ));
                }
                Some(CardNumberInfo {
                    network: Some(sniffed),
                    ..
                }) if sniffed != declared => {
                    errors.push(ValidationError::new(
                        "cardNetwork",
                        format!("Card number appears to be {sniffed}, not {declared}"),
                    ));
                }
                _ => {}
            },
        },
    }

    // Card type
    match data.card_type.as_deref() {
        None | Some("") => errors.push(ValidationError::new("cardType", "Card type is required")),
        Some(raw) => {
            if raw.parse::<CardType>().is_err() {
                errors.push(ValidationError::new("cardType", "Invalid card type"));
            }
        }
    }

    // Expiry: month range, year range, and the expired check are independent
    match data.expiry_month {
        None => errors.push(ValidationError::new(
            "expiryMonth",
            "Expiry month is required",
        )),
        Some(month) if !(1..=12).contains(&month) => errors.push(ValidationError::new(
            "expiryMonth",
            "Expiry month must be between 1 and 12",
        )),
        Some(_) => {}
    }
    match data.expiry_year {
        None => errors.push(ValidationError::new(
            "expiryYear",
            "Expiry year is required",
        )),
        Some(year) if year < i64::from(current_year()) => errors.push(ValidationError::new(
            "expiryYear",
            "Expiry year cannot be in the past",
        )),
        Some(_) => {}
    }
    if let (Some(month), Some(year)) = (data.expiry_month, data.expiry_year) {
        if (1..=12).contains(&month) {
            let month = u32::try_from(month).unwrap_or(0);
            let year = i32::try_from(year).unwrap_or(i32::MIN);
            if !is_expiry_valid(month, year) {
                errors.push(ValidationError::new("expiry", "Card has expired"));
            }
        }
    }

    // Credit limit
    if let Some(limit) = data.credit_limit {
        if limit <= Decimal::ZERO {
            errors.push(ValidationError::new(
                "creditLimit",
                "Credit limit must be a positive number",
            ));
        }
    }

    // Offers
    if data.offers.is_empty() {
        errors.push(ValidationError::new(
            "offers",
            "At least one offer is required",
        ));
    } else {
        for (index, offer) in data.offers.iter().enumerate() {
            let merchant = offer.merchant_category.as_deref().map(str::trim);
            if merchant.is_none() || merchant == Some("") {
                errors.push(ValidationError::new(
                    format!("offers[{index}].merchantCategory"),
                    "Merchant category is required",
                ));
            }
            for error in validate_offer(offer) {
                errors.push(ValidationError::new(
                    format!("offers[{index}].{}", error.field),
                    error.message,
                ));
            }
        }
    }

    errors
}

/// `Result`-typed variant of [`validate_card_data`].
pub fn validate_card_data_strict(data: &CardDraft) -> Result<(), ValidationErrors> {
    let errors = validate_card_data(data);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors::new(errors))
    }
}

/// Joins validation messages into one display string.
///
/// Empty list yields an empty string; a single error yields its message
/// alone; multiple errors become bulleted lines.
pub fn format_validation_errors(errors: &[ValidationError]) -> String {
    match errors {
        [] => String::new(),
        [single] => single.message.clone(),
        many => many
            .iter()
            .map(|error| format!("\u{2022} {}", error.message))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offer::OfferDraft;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn valid_offer() -> OfferDraft {
        OfferDraft {
            merchant_category: Some("Dining".to_string()),
            offer_type: Some("CASHBACK".to_string()),
            percentage: Some(dec!(5)),
            valid_from: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..OfferDraft::default()
        }
    }

    fn valid_draft() -> CardDraft {
        CardDraft {
            name: Some("Platinum Travel".to_string()),
            bank_name: Some("HDFC".to_string()),
            card_number: Some("4532015112830366".to_string()),
            card_network: Some("VISA".to_string()),
            card_type: Some("CREDIT".to_string()),
            expiry_month: Some(12),
            expiry_year: Some(i64::from(current_year()) + 3),
            credit_limit: Some(dec!(250000)),
            offers: vec![valid_offer()],
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        let errors = validate_card_data(&valid_draft());
        assert!(errors.is_empty(), "unexpected: {errors:?}");
    }

    #[test]
    fn test_strict_variant_carries_same_errors() {
        let draft = CardDraft::default();
        let listed = validate_card_data(&draft);
        let wrapped = validate_card_data_strict(&draft).unwrap_err();
        assert_eq!(listed, wrapped.errors);
        assert!(validate_card_data_strict(&valid_draft()).is_ok());
    }

    #[test]
    fn test_network_mismatch_names_both_networks() {
        let mut draft = valid_draft();
        draft.card_network = Some("AMEX".to_string());
        let errors = validate_card_data(&draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "cardNetwork");
        assert!(errors[0].message.contains("VISA"));
        assert!(errors[0].message.contains("AMEX"));
    }

    #[test]
    fn test_unrecognized_number_pattern_is_surfaced() {
        let mut draft = valid_draft();
        // 18 digits with a valid checksum matches no network pattern
        draft.card_number = Some("123456789012345671".to_string());
        let errors = validate_card_data(&draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "cardNetwork");
        assert_eq!(
            errors[0].message,
            "Card number does not match any supported network"
        );
    }

    #[test]
    fn test_expired_is_separate_from_range_errors() {
        let mut draft = valid_draft();
        draft.expiry_month = Some(1);
        draft.expiry_year = Some(i64::from(current_year()) - 1);
        let errors = validate_card_data(&draft);
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"expiryYear"));
        assert!(fields.contains(&"expiry"));
    }

    #[test]
    fn test_formatter_shapes() {
        assert_eq!(format_validation_errors(&[]), "");

        let one = vec![ValidationError::new("name", "Card name is required")];
        assert_eq!(format_validation_errors(&one), "Card name is required");

        let two = vec![
            ValidationError::new("name", "Card name is required"),
            ValidationError::new("bankName", "Bank name is required"),
        ];
        let joined = format_validation_errors(&two);
        assert_eq!(joined.lines().count(), 2);
        assert!(joined.starts_with('\u{2022}'));
    }
}
