//! API middleware

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::{info, warn};

use crate::auth::Claims;
use crate::csrf::CSRF_HEADER_NAME;
use crate::error::ApiError;
use crate::rate_limit::presets;
use crate::AppState;

/// Authentication middleware
///
/// Validates JWT bearer tokens and stores the claims in request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            warn!("Missing or invalid Authorization header");
            return ApiError::Unauthorized.into_response();
        }
    };

    match crate::auth::validate_token(token, &state.config.jwt_secret) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => {
            warn!("Token validation failed: {:?}", e);
            ApiError::Unauthorized.into_response()
        }
    }
}

/// Rate-limiting middleware
///
/// Applies the general API preset keyed by the authenticated user when
/// available, falling back to the client's forwarded address.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let client_id = request
        .extensions()
        .get::<Claims>()
        .map(|c| c.sub.clone())
        .or_else(|| {
            request
                .headers()
                .get("x-forwarded-for")
                .and_then(|h| h.to_str().ok())
                .map(|raw| raw.split(',').next().unwrap_or(raw).trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string());

    let now = Utc::now();
    let decision = state.rate_limiter.check(&client_id, presets::api());

    if !decision.allowed {
        warn!(client = %client_id, "Rate limit exceeded");
        return ApiError::RateLimited {
            retry_after_secs: decision.retry_after_secs(now),
        }
        .into_response();
    }

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    if let Ok(value) = decision.limit.to_string().parse() {
        headers.insert("x-ratelimit-limit", value);
    }
    if let Ok(value) = decision.remaining.to_string().parse() {
        headers.insert("x-ratelimit-remaining", value);
    }
    if let Ok(value) = decision.reset_at.to_rfc3339().parse() {
        headers.insert("x-ratelimit-reset", value);
    }
    response
}

/// CSRF middleware
///
/// State-changing methods must present a token previously issued by the
/// CSRF endpoint. Safe methods pass through untouched.
pub async fn csrf_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !state.config.csrf_enabled {
        return next.run(request).await;
    }

    let method = request.method();
    if method == Method::GET || method == Method::HEAD || method == Method::OPTIONS {
        return next.run(request).await;
    }

    let presented = request
        .headers()
        .get(CSRF_HEADER_NAME)
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned);

    match presented {
        Some(token) if state.csrf.validate(&token) => next.run(request).await,
        _ => {
            warn!(method = %request.method(), uri = %request.uri(), "CSRF token rejected");
            ApiError::Csrf.into_response()
        }
    }
}

/// Request logging middleware
///
/// Logs every API request with its caller, status, and duration.
pub async fn request_log_middleware(
    State(_state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let user = request
        .extensions()
        .get::<Claims>()
        .map(|c| c.sub.clone())
        .unwrap_or_else(|| "anonymous".to_string());

    let start = Utc::now();
    let response = next.run(request).await;
    let duration = Utc::now() - start;

    info!(
        method = %method,
        uri = %uri,
        user = %user,
        status = %response.status().as_u16(),
        duration_ms = duration.num_milliseconds(),
        "Request completed"
    );

    response
}
