//! access token（JWT）検証 → AuthCtx を extensions に入れる
//!
//! - `Authorization: Bearer <jwt>` を取り出し、AuthService で署名 + iss/aud/exp を検証する
//! - 成功: VerifiedIdentity を AuthCtx として request extensions に格納
//! - 失敗: Challenged イベントを出して 401 (WWW-Authenticate 付き)

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};
use chrono::Utc;

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::middleware::bearer_auth::bearer_token;
use crate::state::AppState;

/// 保護したい Router に認証を掛ける。
///
/// 例：
/// ```ignore
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = match bearer_token(req.headers()) {
        Ok(token) => token,
        Err(err) => {
            state.auth.challenge(err.reason());
            return Err(AppError::MissingToken);
        }
    };

    let identity = match state.auth.verify(token, Utc::now()) {
        Ok(identity) => identity,
        Err(failure) => {
            state.auth.challenge(failure.code());
            return Err(AppError::Unauthorized(failure));
        }
    };

    tracing::debug!(subject = %identity.subject, "access token accepted");

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(AuthCtx::new(identity));

    Ok(next.run(req).await)
}
