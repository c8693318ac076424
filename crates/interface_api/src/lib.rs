//! HTTP API Layer
//!
//! This crate provides the REST API for CardWise using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for cards, users, and CSRF tokens
//! - **Middleware**: Authentication, rate limiting, CSRF, request logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Stores**: Port traits with in-memory adapters
//! - **Error Handling**: Consistent error responses; validation failures
//!   return 400 with the engine's error list verbatim
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, config::ApiConfig, AppStores};
//!
//! let app = create_router(AppStores::in_memory(), ApiConfig::default());
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod csrf;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod rate_limit;
pub mod store;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::csrf::CsrfTokenStore;
use crate::middleware::{
    auth_middleware, csrf_middleware, rate_limit_middleware, request_log_middleware,
};
use crate::rate_limit::RateLimiter;
use crate::store::{CardStore, InMemoryCardStore, InMemoryUserStore, UserStore};

/// The storage and shared-state components behind the API
#[derive(Clone)]
pub struct AppStores {
    pub cards: Arc<dyn CardStore>,
    pub users: Arc<dyn UserStore>,
}

impl AppStores {
    /// In-memory stores, suitable for development and tests
    pub fn in_memory() -> Self {
        Self {
            cards: Arc::new(InMemoryCardStore::new()),
            users: Arc::new(InMemoryUserStore::new()),
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub cards: Arc<dyn CardStore>,
    pub users: Arc<dyn UserStore>,
    pub rate_limiter: Arc<RateLimiter>,
    pub csrf: Arc<CsrfTokenStore>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `stores` - Card and user storage adapters
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(stores: AppStores, config: ApiConfig) -> Router {
    let state = AppState {
        cards: stores.cards,
        users: stores.users,
        rate_limiter: Arc::new(RateLimiter::new()),
        csrf: Arc::new(CsrfTokenStore::new()),
        config,
    };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/csrf", get(handlers::csrf::issue_token));

    // Card routes
    let card_routes = Router::new()
        .route(
            "/",
            get(handlers::cards::list_cards).post(handlers::cards::create_card),
        )
        .route(
            "/:id",
            get(handlers::cards::get_card)
                .put(handlers::cards::update_card)
                .delete(handlers::cards::delete_card),
        );

    // User routes
    let user_routes = Router::new()
        .route("/", post(handlers::users::ensure_user))
        .route("/me", get(handlers::users::get_me));

    // Protected API routes; auth runs first, then rate limiting and CSRF
    let api_routes = Router::new()
        .nest("/cards", card_routes)
        .nest("/users", user_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            request_log_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            csrf_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
