//! Shared application state and the health probe.

use axum::{http::StatusCode, Json};
use serde_json::json;

use crate::auth::Sessions;
use crate::db::DbPool;

/// Shared application state for the HTTP handlers and extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub sessions: Sessions,
}

impl AppState {
    pub fn db(&self) -> &DbPool {
        &self.db
    }
    pub fn sessions(&self) -> &Sessions {
        &self.sessions
    }
}

/// GET /health — liveness probe.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "wicket" })),
    )
}
