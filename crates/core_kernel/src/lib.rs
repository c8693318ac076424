//! Core Kernel - Foundational types and utilities for CardWise
//!
//! This crate provides the fundamental building blocks used across all domain
//! modules:
//! - Strongly-typed identifiers for cards and their owners
//! - Temporal helpers for expiry-date arithmetic
//! - Common error types

pub mod error;
pub mod identifiers;
pub mod temporal;

pub use error::CoreError;
pub use identifiers::{CardId, UserId};
pub use temporal::{current_month, current_year, first_day_of_following_month};
