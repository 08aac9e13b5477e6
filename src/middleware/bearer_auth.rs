/*
 * Responsibility
 * - Authorization ヘッダから Bearer トークンを取り出す (ヘッダ抽出のみ)
 * - 検証・拒否は middleware::auth::access 側の責務
 */
use axum::http::{HeaderMap, header};

/// Why no token could be taken from the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BearerError {
    MissingHeader,
    NotBearer,
    EmptyToken,
}

impl BearerError {
    pub fn reason(&self) -> &'static str {
        match self {
            BearerError::MissingHeader => "missing_authorization_header",
            BearerError::NotBearer => "unsupported_auth_scheme",
            BearerError::EmptyToken => "empty_bearer_token",
        }
    }
}

/// `Authorization: Bearer <token>`; the scheme name is case-insensitive.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(BearerError::MissingHeader)?;

    let (scheme, token) = value.split_once(' ').unwrap_or((value, ""));
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(BearerError::NotBearer);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(BearerError::EmptyToken);
    }
    Ok(token)
}
