//! Card Domain
//!
//! This crate implements the card and offer validation engine for CardWise:
//! card-network detection, Luhn checksum validation, expiry validation, and
//! structured multi-field validation of card/offer payloads.
//!
//! # Architecture
//!
//! The domain layer is infrastructure-agnostic. Every function here is pure,
//! synchronous, and stateless: no I/O, no shared mutable state, no clock other
//! than the documented UTC reads in [`expiry`]. Validation failure is data,
//! never a panic - malformed input produces an ordered error list and an empty
//! list means the payload is valid.
//!
//! # Components
//!
//! - [`luhn`]: checksum validation over digit strings
//! - [`network`]: card-network classification from number prefix/length
//! - [`expiry`]: month/year expiry rule (valid through end of month, UTC)
//! - [`offer`]: per-offer field checks and the validated [`Offer`] model
//! - [`validation`]: the orchestrating card-payload validator
//!
//! # Example
//!
//! ```rust
//! use domain_card::{validate_card_data, CardDraft};
//!
//! let draft = CardDraft::default();
//! let errors = validate_card_data(&draft);
//! assert!(!errors.is_empty());
//! for error in &errors {
//!     println!("{}: {}", error.field, error.message);
//! }
//! ```

pub mod card;
pub mod error;
pub mod expiry;
pub mod luhn;
pub mod network;
pub mod offer;
pub mod validation;

pub use card::{Card, CardDraft, CardType};
pub use error::CardError;
pub use expiry::{is_expiry_valid, is_expiry_valid_on};
pub use luhn::luhn_valid;
pub use network::{
    detect_card_network, format_card_number, normalize_card_number, CardNetwork, CardNumberInfo,
};
pub use offer::{
    validate_offer, DayOfWeek, Offer, OfferDraft, OfferTerms, OfferType, Recurrence,
};
pub use validation::{
    format_validation_errors, validate_card_data, validate_card_data_strict, ValidationError,
    ValidationErrors,
};
