//! Card domain errors
//!
//! This module defines all error types that can occur within the
//! card domain.

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Errors that can occur in the card domain
#[derive(Debug, Error)]
pub enum CardError {
    /// Payload failed validation
    #[error("Validation failed")]
    Validation(#[from] ValidationErrors),

    /// Unrecognized card network name
    #[error("Unknown card network: {0}")]
    UnknownNetwork(String),

    /// Unrecognized card type name
    #[error("Unknown card type: {0}")]
    UnknownCardType(String),

    /// Unrecognized offer type name
    #[error("Unknown offer type: {0}")]
    UnknownOfferType(String),

    /// Unrecognized day-of-week name
    #[error("Unknown day of week: {0}")]
    UnknownDayOfWeek(String),
}

impl CardError {
    /// Returns the wrapped validation errors, if any
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            CardError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
