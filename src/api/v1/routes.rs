/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health は公開、それ以外は Bearer 認証 (access middleware) の内側
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::auth::access;
use crate::state::AppState;

use crate::api::v1::handlers::{
    health::health,
    me::me,
    profiles::{get_profile, list_profiles, search_profiles},
};

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(me))
        .route("/profiles", get(list_profiles))
        .route("/profiles/search", post(search_profiles))
        .route("/profiles/{profile_id}", get(get_profile));

    Router::new()
        .route("/health", get(health))
        .merge(access::apply(protected, state))
}
