use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::v1::extractors::AuthCtx;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub subject: String,
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
    pub scopes: Vec<String>,
    pub claims: BTreeMap<String, String>,
}

impl From<AuthCtx> for MeResponse {
    fn from(ctx: AuthCtx) -> Self {
        Self {
            subject: ctx.identity.subject,
            issued_at: ctx.identity.issued_at,
            expires_at: ctx.identity.expires_at,
            scopes: ctx.scopes,
            claims: ctx.identity.claims,
        }
    }
}
