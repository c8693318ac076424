//! Test Data Builders
//!
//! Builder patterns for constructing card and offer drafts with sensible
//! defaults. Tests specify only the fields they care about.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use domain_card::{CardDraft, OfferDraft};

use crate::fixtures::{CardNumberFixtures, TemporalFixtures};

/// Builder for offer drafts that validate cleanly by default
pub struct TestOfferDraftBuilder {
    draft: OfferDraft,
}

impl Default for TestOfferDraftBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestOfferDraftBuilder {
    /// Creates a builder holding a valid cashback offer
    pub fn new() -> Self {
        Self {
            draft: OfferDraft {
                merchant_category: Some("Groceries".to_string()),
                offer_type: Some("CASHBACK".to_string()),
                percentage: Some(dec!(5)),
                valid_from: Some(TemporalFixtures::offer_start()),
                ..OfferDraft::default()
            },
        }
    }

    pub fn with_merchant_category(mut self, category: impl Into<String>) -> Self {
        self.draft.merchant_category = Some(category.into());
        self
    }

    pub fn without_merchant_category(mut self) -> Self {
        self.draft.merchant_category = None;
        self
    }

    pub fn with_offer_type(mut self, offer_type: impl Into<String>) -> Self {
        self.draft.offer_type = Some(offer_type.into());
        self
    }

    pub fn with_percentage(mut self, percentage: Decimal) -> Self {
        self.draft.percentage = Some(percentage);
        self
    }

    pub fn with_points_per_rupee(mut self, points: Decimal) -> Self {
        self.draft.points_per_rupee = Some(points);
        self
    }

    pub fn recurring(mut self) -> Self {
        self.draft.is_recurring = true;
        self
    }

    pub fn with_days_of_week(mut self, raw: impl Into<String>) -> Self {
        self.draft.days_of_week = Some(raw.into());
        self
    }

    pub fn build(self) -> OfferDraft {
        self.draft
    }
}

/// Builder for card drafts that validate cleanly by default
pub struct TestCardDraftBuilder {
    draft: CardDraft,
}

impl Default for TestCardDraftBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCardDraftBuilder {
    /// Creates a builder holding a valid Visa credit card draft
    pub fn new() -> Self {
        Self {
            draft: CardDraft {
                name: Some("Platinum Travel".to_string()),
                bank_name: Some("HDFC".to_string()),
                card_number: Some(CardNumberFixtures::visa().to_string()),
                card_network: Some("VISA".to_string()),
                card_type: Some("CREDIT".to_string()),
                expiry_month: Some(12),
                expiry_year: Some(TemporalFixtures::future_year()),
                credit_limit: Some(dec!(250000)),
                offers: vec![TestOfferDraftBuilder::new().build()],
            },
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.draft.name = Some(name.into());
        self
    }

    pub fn without_name(mut self) -> Self {
        self.draft.name = None;
        self
    }

    pub fn with_bank_name(mut self, bank: impl Into<String>) -> Self {
        self.draft.bank_name = Some(bank.into());
        self
    }

    pub fn with_card_number(mut self, number: impl Into<String>) -> Self {
        self.draft.card_number = Some(number.into());
        self
    }

    pub fn with_card_network(mut self, network: impl Into<String>) -> Self {
        self.draft.card_network = Some(network.into());
        self
    }

    pub fn with_card_type(mut self, card_type: impl Into<String>) -> Self {
        self.draft.card_type = Some(card_type.into());
        self
    }

    pub fn with_expiry(mut self, month: i64, year: i64) -> Self {
        self.draft.expiry_month = Some(month);
        self.draft.expiry_year = Some(year);
        self
    }

    pub fn with_credit_limit(mut self, limit: Decimal) -> Self {
        self.draft.credit_limit = Some(limit);
        self
    }

    pub fn with_offers(mut self, offers: Vec<OfferDraft>) -> Self {
        self.draft.offers = offers;
        self
    }

    pub fn without_offers(mut self) -> Self {
        self.draft.offers = Vec::new();
        self
    }

    pub fn build(self) -> CardDraft {
        self.draft
    }
}
