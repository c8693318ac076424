//! Offer model and validation
//!
//! An offer is a merchant-specific cashback/reward/discount rule attached to
//! a card. Input arrives as a loosely-typed [`OfferDraft`] (the wire shape of
//! the card form); validation accumulates every applicable failure rather
//! than stopping at the first, so callers can surface all problems at once.
//!
//! A draft that validates cleanly converts into the typed [`Offer`] enum,
//! where reward-point offers structurally carry their `points_per_rupee`
//! rate - an invalid field combination is unrepresentable after conversion.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CardError;
use crate::validation::{ValidationError, ValidationErrors};

/// The kind of benefit an offer grants.
///
/// Determines which additional numeric fields are required; reward-point
/// offers must carry a points-per-rupee rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferType {
    Cashback,
    RewardPoints,
    Miles,
    Discount,
}

impl OfferType {
    /// All supported offer types.
    pub const ALL: [OfferType; 4] = [
        OfferType::Cashback,
        OfferType::RewardPoints,
        OfferType::Miles,
        OfferType::Discount,
    ];

    /// The wire/storage name of this offer type.
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferType::Cashback => "CASHBACK",
            OfferType::RewardPoints => "REWARD_POINTS",
            OfferType::Miles => "MILES",
            OfferType::Discount => "DISCOUNT",
        }
    }
}

impl fmt::Display for OfferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OfferType {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CASHBACK" => Ok(OfferType::Cashback),
            "REWARD_POINTS" => Ok(OfferType::RewardPoints),
            "MILES" => Ok(OfferType::Miles),
            "DISCOUNT" => Ok(OfferType::Discount),
            other => Err(CardError::UnknownOfferType(other.to_string())),
        }
    }
}

/// Day of week for recurring offers, wire-named `MON`..`SUN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DayOfWeek {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl FromStr for DayOfWeek {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MON" => Ok(DayOfWeek::Mon),
            "TUE" => Ok(DayOfWeek::Tue),
            "WED" => Ok(DayOfWeek::Wed),
            "THU" => Ok(DayOfWeek::Thu),
            "FRI" => Ok(DayOfWeek::Fri),
            "SAT" => Ok(DayOfWeek::Sat),
            "SUN" => Ok(DayOfWeek::Sun),
            other => Err(CardError::UnknownDayOfWeek(other.to_string())),
        }
    }
}

/// Loosely-typed offer input, as submitted by the card form.
///
/// Every field is optional at this layer; [`validate_offer`] reports what is
/// missing or malformed. `days_of_week` carries a JSON-serialized array
/// (`["MON","FRI"]`), matching how the original schema persists the column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OfferDraft {
    pub merchant_category: Option<String>,
    pub offer_type: Option<String>,
    pub percentage: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    pub min_spend: Option<Decimal>,
    pub valid_from: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    pub is_recurring: bool,
    pub day_of_month: Option<i64>,
    pub days_of_week: Option<String>,
    pub max_uses_per_month: Option<i64>,
    pub points_per_rupee: Option<Decimal>,
    pub conditions: Option<String>,
}

impl OfferDraft {
    /// Validates this draft; see [`validate_offer`].
    pub fn validate(&self) -> Vec<ValidationError> {
        validate_offer(self)
    }

    /// Converts the draft into a validated, typed [`Offer`].
    ///
    /// On top of [`validate_offer`], conversion requires the merchant
    /// category, which the card-level validator checks per offer.
    pub fn into_offer(self) -> Result<Offer, ValidationErrors> {
        let mut errors = Vec::new();
        if trimmed_is_empty(self.merchant_category.as_deref()) {
            errors.push(ValidationError::new(
                "merchantCategory",
                "Merchant category is required",
            ));
        }
        errors.extend(validate_offer(&self));

        let (Some(merchant_category), Some(offer_type), Some(percentage), Some(valid_from)) = (
            self.merchant_category.clone(),
            parse_offer_type(self.offer_type.as_deref()),
            self.percentage,
            self.valid_from,
        ) else {
            return Err(ValidationErrors::new(errors));
        };
        if !errors.is_empty() {
            return Err(ValidationErrors::new(errors));
        }

        let points_per_rupee = self.points_per_rupee;
        let recurrence = if self.is_recurring {
            Some(Recurrence {
                day_of_month: self.day_of_month.and_then(|d| u8::try_from(d).ok()),
                days_of_week: self.days_of_week.as_deref().and_then(parse_days_of_week),
                max_uses_per_month: self.max_uses_per_month.and_then(|u| u32::try_from(u).ok()),
            })
        } else {
            None
        };

        let terms = OfferTerms {
            merchant_category,
            percentage,
            max_amount: self.max_amount,
            min_spend: self.min_spend,
            valid_from,
            valid_until: self.valid_until,
            recurrence,
            conditions: self.conditions,
        };

        Ok(match offer_type {
            OfferType::Cashback => Offer::Cashback { terms },
            OfferType::RewardPoints => {
                let Some(points_per_rupee) = points_per_rupee else {
                    return Err(ValidationErrors::single(
                        "pointsPerRupee",
                        "Points per rupee must be a positive number for reward point offers",
                    ));
                };
                Offer::RewardPoints {
                    terms,
                    points_per_rupee,
                }
            }
            OfferType::Miles => Offer::Miles { terms },
            OfferType::Discount => Offer::Discount { terms },
        })
    }
}

/// Recurrence rules for a recurring offer.
///
/// All fields are optional: a partially-specified recurrence is tolerated
/// and each field is validated only when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recurrence {
    /// Day of month the offer reapplies on (1-31)
    pub day_of_month: Option<u8>,
    /// Days of week the offer reapplies on
    pub days_of_week: Option<Vec<DayOfWeek>>,
    /// Usage cap per calendar month (>= 1)
    pub max_uses_per_month: Option<u32>,
}

/// Terms shared by every offer variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferTerms {
    /// Merchant category the offer applies to
    pub merchant_category: String,
    /// Benefit percentage, 0-100
    pub percentage: Decimal,
    /// Benefit cap per use
    pub max_amount: Option<Decimal>,
    /// Minimum spend to qualify
    pub min_spend: Option<Decimal>,
    /// First day the offer applies
    pub valid_from: NaiveDate,
    /// Last-exclusive day; strictly after `valid_from` when present
    pub valid_until: Option<NaiveDate>,
    /// Recurrence rules, present only for recurring offers
    pub recurrence: Option<Recurrence>,
    /// Free-text conditions shown to the user
    pub conditions: Option<String>,
}

/// A validated offer, tagged by benefit type.
///
/// Reward-point offers carry their rate structurally, so a missing
/// `points_per_rupee` cannot survive conversion from a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "offerType", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Offer {
    Cashback {
        #[serde(flatten)]
        terms: OfferTerms,
    },
    RewardPoints {
        #[serde(flatten)]
        terms: OfferTerms,
        #[serde(rename = "pointsPerRupee")]
        points_per_rupee: Decimal,
    },
    Miles {
        #[serde(flatten)]
        terms: OfferTerms,
    },
    Discount {
        #[serde(flatten)]
        terms: OfferTerms,
    },
}

impl Offer {
    /// The benefit type tag of this offer.
    pub fn offer_type(&self) -> OfferType {
        match self {
            Offer::Cashback { .. } => OfferType::Cashback,
            Offer::RewardPoints { .. } => OfferType::RewardPoints,
            Offer::Miles { .. } => OfferType::Miles,
            Offer::Discount { .. } => OfferType::Discount,
        }
    }

    /// The terms shared by all variants.
    pub fn terms(&self) -> &OfferTerms {
        match self {
            Offer::Cashback { terms }
            | Offer::RewardPoints { terms, .. }
            | Offer::Miles { terms }
            | Offer::Discount { terms } => terms,
        }
    }
}

/// Validates a single offer draft.
///
/// Every applicable check runs; nothing short-circuits. Errors come back in
/// a fixed order (offer type, percentage, amounts, dates, recurrence,
/// reward-point rate) with bare field names - the card-level validator
/// prefixes the offer's position. Stateless: two calls on the same draft
/// yield identical output.
pub fn validate_offer(offer: &OfferDraft) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    match offer.offer_type.as_deref() {
        None => errors.push(ValidationError::new("offerType", "Offer type is required")),
        Some(raw) => {
            if raw.parse::<OfferType>().is_err() {
                errors.push(ValidationError::new("offerType", "Invalid offer type"));
            }
        }
    }

    match offer.percentage {
        Some(p) if p >= Decimal::ZERO && p <= dec!(100) => {}
        _ => errors.push(ValidationError::new(
            "percentage",
            "Percentage must be between 0 and 100",
        )),
    }

    if let Some(max_amount) = offer.max_amount {
        if max_amount <= Decimal::ZERO {
            errors.push(ValidationError::new(
                "maxAmount",
                "Maximum amount must be a positive number",
            ));
        }
    }

    if let Some(min_spend) = offer.min_spend {
        if min_spend <= Decimal::ZERO {
            errors.push(ValidationError::new(
                "minSpend",
                "Minimum spend must be a positive number",
            ));
        }
    }

    if offer.valid_from.is_none() {
        errors.push(ValidationError::new(
            "validFrom",
            "Valid from date is required",
        ));
    }

    if let (Some(from), Some(until)) = (offer.valid_from, offer.valid_until) {
        if until <= from {
            errors.push(ValidationError::new(
                "validUntil",
                "Valid until date must be after valid from date",
            ));
        }
    }

    if offer.is_recurring {
        if let Some(day) = offer.day_of_month {
            if !(1..=31).contains(&day) {
                errors.push(ValidationError::new(
                    "dayOfMonth",
                    "Day of month must be between 1 and 31",
                ));
            }
        }

        if let Some(raw) = offer.days_of_week.as_deref() {
            if parse_days_of_week(raw).is_none() {
                errors.push(ValidationError::new(
                    "daysOfWeek",
                    "Invalid days of week format",
                ));
            }
        }

        if let Some(uses) = offer.max_uses_per_month {
            if uses < 1 {
                errors.push(ValidationError::new(
                    "maxUsesPerMonth",
                    "Maximum uses per month must be a positive number",
                ));
            }
        }
    }

    if parse_offer_type(offer.offer_type.as_deref()) == Some(OfferType::RewardPoints) {
        match offer.points_per_rupee {
            Some(points) if points > Decimal::ZERO => {}
            _ => errors.push(ValidationError::new(
                "pointsPerRupee",
                "Points per rupee must be a positive number for reward point offers",
            )),
        }
    }

    errors
}

/// Parses a JSON-serialized day-of-week array (`["MON","FRI"]`).
///
/// Returns `None` on malformed JSON, a non-array value, or an unknown day
/// name - all reported upstream as a single format error.
pub fn parse_days_of_week(raw: &str) -> Option<Vec<DayOfWeek>> {
    serde_json::from_str(raw).ok()
}

fn parse_offer_type(raw: Option<&str>) -> Option<OfferType> {
    raw.and_then(|r| r.parse().ok())
}

fn trimmed_is_empty(value: Option<&str>) -> bool {
    value.map(str::trim).unwrap_or("").is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> OfferDraft {
        OfferDraft {
            merchant_category: Some("Groceries".to_string()),
            offer_type: Some("CASHBACK".to_string()),
            percentage: Some(dec!(5)),
            valid_from: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..OfferDraft::default()
        }
    }

    #[test]
    fn test_valid_offer_has_no_errors() {
        assert!(validate_offer(&valid_draft()).is_empty());
    }

    #[test]
    fn test_missing_offer_type() {
        let mut draft = valid_draft();
        draft.offer_type = None;
        let errors = validate_offer(&draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "offerType");
        assert_eq!(errors[0].message, "Offer type is required");
    }

    #[test]
    fn test_unknown_offer_type() {
        let mut draft = valid_draft();
        draft.offer_type = Some("LOUNGE_ACCESS".to_string());
        let errors = validate_offer(&draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Invalid offer type");
    }

    #[test]
    fn test_percentage_bounds() {
        for bad in [dec!(-0.5), dec!(100.01)] {
            let mut draft = valid_draft();
            draft.percentage = Some(bad);
            let errors = validate_offer(&draft);
            assert!(errors.iter().any(|e| e.field == "percentage"));
        }
        for good in [Decimal::ZERO, dec!(100)] {
            let mut draft = valid_draft();
            draft.percentage = Some(good);
            assert!(validate_offer(&draft).is_empty());
        }
    }

    #[test]
    fn test_missing_percentage_is_reported() {
        let mut draft = valid_draft();
        draft.percentage = None;
        let errors = validate_offer(&draft);
        assert!(errors.iter().any(|e| e.field == "percentage"));
    }

    #[test]
    fn test_optional_amounts_must_be_positive() {
        let mut draft = valid_draft();
        draft.max_amount = Some(Decimal::ZERO);
        draft.min_spend = Some(dec!(-10));
        let errors = validate_offer(&draft);
        assert!(errors.iter().any(|e| e.field == "maxAmount"));
        assert!(errors.iter().any(|e| e.field == "minSpend"));
    }

    #[test]
    fn test_valid_until_must_follow_valid_from() {
        let mut draft = valid_draft();
        draft.valid_until = draft.valid_from;
        let errors = validate_offer(&draft);
        assert!(errors.iter().any(|e| e.field == "validUntil"));

        let mut draft = valid_draft();
        draft.valid_until = NaiveDate::from_ymd_opt(2024, 6, 1);
        assert!(validate_offer(&draft).is_empty());
    }

    #[test]
    fn test_recurrence_fields_checked_only_when_recurring() {
        let mut draft = valid_draft();
        draft.day_of_month = Some(45);
        draft.max_uses_per_month = Some(0);
        assert!(validate_offer(&draft).is_empty());

        draft.is_recurring = true;
        let errors = validate_offer(&draft);
        assert!(errors.iter().any(|e| e.field == "dayOfMonth"));
        assert!(errors.iter().any(|e| e.field == "maxUsesPerMonth"));
    }

    #[test]
    fn test_partial_recurrence_is_tolerated() {
        let mut draft = valid_draft();
        draft.is_recurring = true;
        assert!(validate_offer(&draft).is_empty());
    }

    #[test]
    fn test_days_of_week_formats() {
        let mut draft = valid_draft();
        draft.is_recurring = true;

        draft.days_of_week = Some(r#"["MON","FRI"]"#.to_string());
        assert!(validate_offer(&draft).is_empty());

        for bad in [r#"["MONDAY"]"#, "not json", r#"{"day":"MON"}"#] {
            draft.days_of_week = Some(bad.to_string());
            let errors = validate_offer(&draft);
            assert_eq!(errors.len(), 1, "input: {bad}");
            assert_eq!(errors[0].field, "daysOfWeek");
            assert_eq!(errors[0].message, "Invalid days of week format");
        }
    }

    #[test]
    fn test_reward_points_requires_rate() {
        let draft = OfferDraft {
            offer_type: Some("REWARD_POINTS".to_string()),
            percentage: Some(dec!(10)),
            valid_from: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..OfferDraft::default()
        };
        let errors = validate_offer(&draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "pointsPerRupee");

        let mut draft = draft;
        draft.points_per_rupee = Some(dec!(2));
        assert!(validate_offer(&draft).is_empty());
    }

    #[test]
    fn test_validation_is_idempotent() {
        let mut draft = valid_draft();
        draft.offer_type = Some("REWARD_POINTS".to_string());
        draft.percentage = Some(dec!(200));
        draft.is_recurring = true;
        draft.days_of_week = Some("broken".to_string());

        let first = validate_offer(&draft);
        let second = validate_offer(&draft);
        assert_eq!(first, second);
    }

    #[test]
    fn test_error_order_is_fixed() {
        let draft = OfferDraft {
            offer_type: Some("REWARD_POINTS".to_string()),
            percentage: Some(dec!(150)),
            max_amount: Some(Decimal::ZERO),
            is_recurring: true,
            day_of_month: Some(0),
            ..OfferDraft::default()
        };
        let errors = validate_offer(&draft);
        let fields: Vec<&str> = errors
            .iter()
            .map(|e| e.field.as_str())
            .collect();
        assert_eq!(
            fields,
            vec![
                "percentage",
                "maxAmount",
                "validFrom",
                "dayOfMonth",
                "pointsPerRupee"
            ]
        );
    }

    #[test]
    fn test_into_offer_builds_tagged_variant() {
        let mut draft = valid_draft();
        draft.offer_type = Some("REWARD_POINTS".to_string());
        draft.points_per_rupee = Some(dec!(4));
        draft.is_recurring = true;
        draft.days_of_week = Some(r#"["SAT","SUN"]"#.to_string());

        let offer = draft.into_offer().unwrap();
        assert_eq!(offer.offer_type(), OfferType::RewardPoints);
        match &offer {
            Offer::RewardPoints {
                points_per_rupee, ..
            } => assert_eq!(*points_per_rupee, dec!(4)),
            other => panic!("unexpected variant: {other:?}"),
        }
        assert_eq!(
            offer.terms().recurrence.as_ref().unwrap().days_of_week,
            Some(vec![DayOfWeek::Sat, DayOfWeek::Sun])
        );
    }

    #[test]
    fn test_into_offer_requires_merchant_category() {
        let mut draft = valid_draft();
        draft.merchant_category = None;
        let errors = draft.into_offer().unwrap_err();
        assert_eq!(errors.errors[0].field, "merchantCategory");
    }

    #[test]
    fn test_offer_serializes_with_type_tag() {
        let offer = valid_draft().into_offer().unwrap();
        let json = serde_json::to_value(&offer).unwrap();
        assert_eq!(json["offerType"], "CASHBACK");
        assert_eq!(json["merchantCategory"], "Groceries");
    }
}
