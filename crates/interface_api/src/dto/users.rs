//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile upsert request; the subject always comes from the verified token
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnsureUserRequest {
    pub email: Option<String>,
}

/// User profile returned by the API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub subject: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}
