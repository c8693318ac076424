//! Card DTOs
//!
//! Create and update requests reuse the loosely-typed `CardDraft` wire shape
//! directly, so the validator sees exactly what the client sent.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::CardId;
use domain_card::{Card, Offer};

/// Card representation returned by the API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardResponse {
    pub id: CardId,
    pub name: String,
    pub bank_name: String,
    pub last_four_digits: String,
    /// Masked number for display, e.g. `**** **** **** 0366`
    pub display_number: String,
    pub network: String,
    pub card_type: String,
    pub expiry_month: u32,
    pub expiry_year: i32,
    pub credit_limit: Option<Decimal>,
    pub is_expired: bool,
    pub offers: Vec<Offer>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Card> for CardResponse {
    fn from(card: Card) -> Self {
        let display_number = format!("**** **** **** {}", card.last_four_digits);
        let is_expired = card.is_expired();
        Self {
            id: card.id,
            display_number,
            is_expired,
            name: card.name,
            bank_name: card.bank_name,
            last_four_digits: card.last_four_digits,
            network: card.network.to_string(),
            card_type: card.card_type.to_string(),
            expiry_month: card.expiry_month,
            expiry_year: card.expiry_year,
            credit_limit: card.credit_limit,
            offers: card.offers,
            created_at: card.created_at,
            updated_at: card.updated_at,
        }
    }
}
