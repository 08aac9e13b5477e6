/*
 * Responsibility
 * - GET /health (疎通用、認証なし)
 * - 認証イベントのカウンタも返す
 */
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use serde_json::json;

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "timestamp": Utc::now(),
            "service": env!("CARGO_PKG_NAME"),
            "endpoints": [
                "GET /api/v1/me",
                "GET /api/v1/profiles",
                "GET /api/v1/profiles/{profile_id}",
                "POST /api/v1/profiles/search",
            ],
            "auth": state.auth_stats.snapshot(),
        })),
    )
}
