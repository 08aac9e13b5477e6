/*
 * Responsibility
 * - 検索結果のレスポンス envelope (results + ページング情報)
 * - request 側は services::search::SearchRequest をそのまま受ける
 */
use serde::Serialize;

use crate::services::search::PageResult;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse<T> {
    pub results: Vec<T>,
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> From<PageResult<T>> for SearchResponse<T> {
    fn from(p: PageResult<T>) -> Self {
        Self {
            results: p.items,
            total_count: p.total_count,
            page: p.page,
            page_size: p.page_size,
            total_pages: p.total_pages,
            has_next: p.has_next,
            has_previous: p.has_previous,
        }
    }
}
