//! CSRF token issuance

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::AppState;

/// Issued CSRF token, echoed back in the `x-csrf-token` header on writes
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsrfTokenResponse {
    pub csrf_token: String,
}

/// Issues a fresh CSRF token for the client's next state-changing request
pub async fn issue_token(State(state): State<AppState>) -> Json<CsrfTokenResponse> {
    let csrf_token = state.csrf.issue();
    Json(CsrfTokenResponse { csrf_token })
}
