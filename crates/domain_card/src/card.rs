//! Card entity and input model
//!
//! [`CardDraft`] is the loosely-typed wire shape of the card form: every
//! field optional, validated as a whole by the card validator. [`Card`] is
//! the validated entity the API layer stores - it keeps only the last four
//! digits of the number, the full number never survives validation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{CardId, UserId};

use crate::error::CardError;
use crate::expiry::is_expiry_valid;
use crate::network::{normalize_card_number, CardNetwork};
use crate::offer::{Offer, OfferDraft};
use crate::validation::{validate_card_data, ValidationError, ValidationErrors};

/// Whether a card draws on credit or a bank balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    Credit,
    Debit,
}

impl CardType {
    /// The wire/storage name of this card type.
    pub fn as_str(&self) -> &'static str {
        match self {
            CardType::Credit => "CREDIT",
            CardType::Debit => "DEBIT",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardType {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREDIT" => Ok(CardType::Credit),
            "DEBIT" => Ok(CardType::Debit),
            other => Err(CardError::UnknownCardType(other.to_string())),
        }
    }
}

/// Loosely-typed card payload, as submitted by the card form.
///
/// Every field is optional at this layer so the validator can report all
/// missing and malformed fields in one pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardDraft {
    pub name: Option<String>,
    pub bank_name: Option<String>,
    /// Full card number; only the last four digits are retained
    pub card_number: Option<String>,
    pub card_network: Option<String>,
    pub card_type: Option<String>,
    pub expiry_month: Option<i64>,
    pub expiry_year: Option<i64>,
    pub credit_limit: Option<Decimal>,
    pub offers: Vec<OfferDraft>,
}

/// A validated card with its offers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub user_id: UserId,
    pub name: String,
    pub bank_name: String,
    /// Last four digits of the card number, for display
    pub last_four_digits: String,
    pub network: CardNetwork,
    pub card_type: CardType,
    pub expiry_month: u32,
    pub expiry_year: i32,
    pub credit_limit: Option<Decimal>,
    pub offers: Vec<Offer>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Card {
    /// Validates a draft and builds the entity for the given owner.
    ///
    /// Returns the full, ordered error list when the draft fails validation.
    pub fn from_draft(draft: CardDraft, user_id: UserId) -> Result<Card, ValidationErrors> {
        let parts = CardParts::try_from_draft(draft)?;
        let now = Utc::now();
        Ok(Card {
            id: CardId::new_v7(),
            user_id,
            name: parts.name,
            bank_name: parts.bank_name,
            last_four_digits: parts.last_four_digits,
            network: parts.network,
            card_type: parts.card_type,
            expiry_month: parts.expiry_month,
            expiry_year: parts.expiry_year,
            credit_limit: parts.credit_limit,
            offers: parts.offers,
            created_at: now,
            updated_at: now,
        })
    }

    /// Re-validates a draft and applies it to this card in place.
    ///
    /// Identity and creation time are preserved; `updated_at` advances.
    pub fn apply_draft(&mut self, draft: CardDraft) -> Result<(), ValidationErrors> {
        let parts = CardParts::try_from_draft(draft)?;
        self.name = parts.name;
        self.bank_name = parts.bank_name;
        self.last_four_digits = parts.last_four_digits;
        self.network = parts.network;
        self.card_type = parts.card_type;
        self.expiry_month = parts.expiry_month;
        self.expiry_year = parts.expiry_year;
        self.credit_limit = parts.credit_limit;
        self.offers = parts.offers;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Whether the card's expiry month has passed (UTC).
    pub fn is_expired(&self) -> bool {
        !is_expiry_valid(self.expiry_month, self.expiry_year)
    }
}

/// The validated fields extracted from a draft, shared by create and update.
struct CardParts {
    name: String,
    bank_name: String,
    last_four_digits: String,
    network: CardNetwork,
    card_type: CardType,
    expiry_month: u32,
    expiry_year: i32,
    credit_limit: Option<Decimal>,
    offers: Vec<Offer>,
}

impl CardParts {
    fn try_from_draft(draft: CardDraft) -> Result<CardParts, ValidationErrors> {
        let errors = validate_card_data(&draft);
        if !errors.is_empty() {
            return Err(ValidationErrors::new(errors));
        }

        let name = require(draft.name, "name")?;
        let bank_name = require(draft.bank_name, "bankName")?;
        let number = require(draft.card_number, "cardNumber")?;
        let network = require(
            draft.card_network.as_deref().and_then(|raw| raw.parse().ok()),
            "cardNetwork",
        )?;
        let card_type = require(
            draft.card_type.as_deref().and_then(|raw| raw.parse().ok()),
            "cardType",
        )?;
        let expiry_month = require(
            draft.expiry_month.and_then(|m| u32::try_from(m).ok()),
            "expiryMonth",
        )?;
        let expiry_year = require(
            draft.expiry_year.and_then(|y| i32::try_from(y).ok()),
            "expiryYear",
        )?;

        let normalized = normalize_card_number(&number);
        let last_four_digits = normalized
            .get(normalized.len().saturating_sub(4)..)
            .unwrap_or("")
            .to_string();

        let mut offers = Vec::with_capacity(draft.offers.len());
        for (index, offer_draft) in draft.offers.into_iter().enumerate() {
            match offer_draft.into_offer() {
                Ok(offer) => offers.push(offer),
                Err(offer_errors) => {
                    let errors = offer_errors
                        .errors
                        .into_iter()
                        .map(|e| {
                            ValidationError::new(format!("offers[{index}].{}", e.field), e.message)
                        })
                        .collect();
                    return Err(ValidationErrors::new(errors));
                }
            }
        }

        Ok(CardParts {
            name,
            bank_name,
            last_four_digits,
            network,
            card_type,
            expiry_month,
            expiry_year,
            credit_limit: draft.credit_limit,
            offers,
        })
    }
}

fn require<T>(value: Option<T>, field: &str) -> Result<T, ValidationErrors> {
    value.ok_or_else(|| ValidationErrors::single(field, "Required field is missing"))
}
