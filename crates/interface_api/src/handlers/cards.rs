//! Card handlers
//!
//! Every write validates the payload first and persists only when the error
//! list comes back empty; a non-empty list becomes a 400 response carrying
//! the list verbatim.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use tracing::{info, warn};

use core_kernel::CardId;
use domain_card::{validate_card_data, Card, CardDraft};

use crate::auth::Claims;
use crate::dto::cards::CardResponse;
use crate::error::ApiError;
use crate::AppState;

/// Lists the authenticated user's cards
pub async fn list_cards(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<CardResponse>>, ApiError> {
    let user_id = state.users.user_id_for(&claims.sub);
    let cards = state.cards.list(user_id).await;

    info!(user = %claims.sub, count = cards.len(), "Cards fetched");

    Ok(Json(cards.into_iter().map(CardResponse::from).collect()))
}

/// Creates a card from a validated draft
pub async fn create_card(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(draft): Json<CardDraft>,
) -> Result<Json<CardResponse>, ApiError> {
    let user_id = state.users.user_id_for(&claims.sub);

    // The profile row is created on first write, like the original upsert
    state.users.upsert(&claims.sub, claims.email.clone()).await;

    let errors = validate_card_data(&draft);
    if !errors.is_empty() {
        warn!(user = %claims.sub, count = errors.len(), "Card validation failed");
        return Err(ApiError::Validation(domain_card::ValidationErrors::new(
            errors,
        )));
    }

    let card = Card::from_draft(draft, user_id)?;
    info!(user = %claims.sub, card = %card.id, "Card created");

    state.cards.insert(card.clone()).await;
    Ok(Json(CardResponse::from(card)))
}

/// Fetches one of the authenticated user's cards
pub async fn get_card(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(card_id): Path<CardId>,
) -> Result<Json<CardResponse>, ApiError> {
    let user_id = state.users.user_id_for(&claims.sub);
    let card = state.cards.get(user_id, card_id).await?;
    Ok(Json(CardResponse::from(card)))
}

/// Re-validates a draft and replaces an existing card's data
pub async fn update_card(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(card_id): Path<CardId>,
    Json(draft): Json<CardDraft>,
) -> Result<Json<CardResponse>, ApiError> {
    let user_id = state.users.user_id_for(&claims.sub);

    let errors = validate_card_data(&draft);
    if !errors.is_empty() {
        warn!(user = %claims.sub, card = %card_id, count = errors.len(), "Card validation failed");
        return Err(ApiError::Validation(domain_card::ValidationErrors::new(
            errors,
        )));
    }

    let mut card = state.cards.get(user_id, card_id).await?;
    card.apply_draft(draft)?;
    state.cards.update(card.clone()).await?;

    info!(user = %claims.sub, card = %card_id, "Card updated");
    Ok(Json(CardResponse::from(card)))
}

/// Deletes one of the authenticated user's cards
pub async fn delete_card(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(card_id): Path<CardId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user_id = state.users.user_id_for(&claims.sub);
    state.cards.delete(user_id, card_id).await?;

    info!(user = %claims.sub, card = %card_id, "Card deleted");
    Ok(Json(serde_json::json!({ "deleted": true })))
}
