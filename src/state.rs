/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - auth: AuthService, profiles: ProfileSource, search: SearchPolicy, id_codec: IdCodec
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 * - リクエスト間で共有する可変状態は持たない (AuthStats のカウンタのみ)
 */
use std::sync::Arc;

use crate::services::{
    auth::{AuthService, AuthStats},
    id_codec::IdCodec,
    profiles::ProfileSource,
    search::SearchPolicy,
};

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub auth_stats: Arc<AuthStats>,
    pub profiles: Arc<dyn ProfileSource>,
    pub search: SearchPolicy,
    pub search_pool_size: usize,
    pub id_codec: IdCodec,
}

impl AppState {
    pub fn new(
        auth: Arc<AuthService>,
        auth_stats: Arc<AuthStats>,
        profiles: Arc<dyn ProfileSource>,
        search: SearchPolicy,
        search_pool_size: usize,
        id_codec: IdCodec,
    ) -> Self {
        Self {
            auth,
            auth_stats,
            profiles,
            search,
            search_pool_size,
            id_codec,
        }
    }
}
