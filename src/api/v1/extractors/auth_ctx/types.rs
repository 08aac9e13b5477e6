/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - JWT の検証ロジックは middleware/services 側の責務
 * - ここは「型（契約）」として固定化する
 */
use crate::services::auth::VerifiedIdentity;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `identity` は検証済みトークンの subject / 有効期限 / claims
/// - `scopes` は `scope` claim (space-separated) を分解したもの
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub identity: VerifiedIdentity,
    pub scopes: Vec<String>,
}

impl AuthCtx {
    pub fn new(identity: VerifiedIdentity) -> Self {
        let scopes = identity
            .claims
            .get("scope")
            .map(|s| s.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();

        Self { identity, scopes }
    }

    pub fn subject(&self) -> &str {
        &self.identity.subject
    }
}
