//! Storage ports and in-memory adapters
//!
//! The API layer talks to storage through port traits so the persistence
//! engine can change without touching handlers. The shipped adapters keep
//! everything in memory behind an async `RwLock`; a database adapter would
//! implement the same traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

use core_kernel::{CardId, UserId};
use domain_card::Card;

/// Errors from storage operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested entity was not found for this owner
    #[error("Not found: {entity} {id}")]
    NotFound { entity: &'static str, id: String },
}

impl StoreError {
    pub fn card_not_found(id: CardId) -> Self {
        StoreError::NotFound {
            entity: "card",
            id: id.to_string(),
        }
    }

    pub fn user_not_found(id: &str) -> Self {
        StoreError::NotFound {
            entity: "user",
            id: id.to_string(),
        }
    }
}

/// Port for card persistence, scoped by owner
#[async_trait]
pub trait CardStore: Send + Sync + 'static {
    /// Lists all cards owned by `user_id`, newest first
    async fn list(&self, user_id: UserId) -> Vec<Card>;

    /// Fetches one card, verifying ownership
    async fn get(&self, user_id: UserId, card_id: CardId) -> Result<Card, StoreError>;

    /// Inserts a new card
    async fn insert(&self, card: Card);

    /// Replaces an existing card, verifying ownership
    async fn update(&self, card: Card) -> Result<(), StoreError>;

    /// Deletes a card, verifying ownership
    async fn delete(&self, user_id: UserId, card_id: CardId) -> Result<(), StoreError>;
}

/// A registered user profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Identity-provider subject, the stable user key
    pub subject: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Port for user-profile persistence
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Creates the profile if absent; returns the stored profile either way
    async fn upsert(&self, subject: &str, email: Option<String>) -> UserProfile;

    /// Fetches a profile by subject
    async fn get(&self, subject: &str) -> Result<UserProfile, StoreError>;

    /// Maps an identity-provider subject to the internal user id
    fn user_id_for(&self, subject: &str) -> UserId;
}

/// In-memory card store
#[derive(Default)]
pub struct InMemoryCardStore {
    cards: RwLock<HashMap<CardId, Card>>,
}

impl InMemoryCardStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CardStore for InMemoryCardStore {
    async fn list(&self, user_id: UserId) -> Vec<Card> {
        let cards = self.cards.read().await;
        let mut owned: Vec<Card> = cards
            .values()
            .filter(|card| card.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        owned
    }

    async fn get(&self, user_id: UserId, card_id: CardId) -> Result<Card, StoreError> {
        let cards = self.cards.read().await;
        cards
            .get(&card_id)
            .filter(|card| card.user_id == user_id)
            .cloned()
            .ok_or_else(|| StoreError::card_not_found(card_id))
    }

    async fn insert(&self, card: Card) {
        let mut cards = self.cards.write().await;
        cards.insert(card.id, card);
    }

    async fn update(&self, card: Card) -> Result<(), StoreError> {
        let mut cards = self.cards.write().await;
        match cards.get(&card.id) {
            Some(existing) if existing.user_id == card.user_id => {
                cards.insert(card.id, card);
                Ok(())
            }
            _ => Err(StoreError::card_not_found(card.id)),
        }
    }

    async fn delete(&self, user_id: UserId, card_id: CardId) -> Result<(), StoreError> {
        let mut cards = self.cards.write().await;
        match cards.get(&card_id) {
            Some(existing) if existing.user_id == user_id => {
                cards.remove(&card_id);
                Ok(())
            }
            _ => Err(StoreError::card_not_found(card_id)),
        }
    }
}

/// In-memory user store
///
/// Subjects map deterministically onto internal `UserId`s via a UUIDv5-style
/// derivation so repeated upserts agree across calls.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, UserProfile>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn upsert(&self, subject: &str, email: Option<String>) -> UserProfile {
        let mut users = self.users.write().await;
        users
            .entry(subject.to_string())
            .or_insert_with(|| UserProfile {
                subject: subject.to_string(),
                email,
                created_at: Utc::now(),
            })
            .clone()
    }

    async fn get(&self, subject: &str) -> Result<UserProfile, StoreError> {
        let users = self.users.read().await;
        users
            .get(subject)
            .cloned()
            .ok_or_else(|| StoreError::user_not_found(subject))
    }

    fn user_id_for(&self, subject: &str) -> UserId {
        derive_user_id(subject)
    }
}

/// Derives a stable `UserId` from an identity-provider subject.
fn derive_user_id(subject: &str) -> UserId {
    let namespace = uuid::Uuid::NAMESPACE_OID;
    UserId::from_uuid(uuid::Uuid::new_v5(&namespace, subject.as_bytes()))
}
