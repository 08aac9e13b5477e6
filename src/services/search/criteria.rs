/*
 * Responsibility
 * - 生の検索リクエスト (minAge/maxAge/page/pageSize) → 正規化済み SearchCriteria
 * - page / pageSize の既定値と上限 (SearchPolicy)
 * - I/O なし、副作用なし
 */
use serde::Deserialize;

/// Raw search request as received from the client. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub min_age: Option<i64>,
    #[serde(default)]
    pub max_age: Option<i64>,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub page_size: Option<i64>,
}

/// Canonical search predicate + paging window.
///
/// Fields are private so `page >= 1` and `page_size >= 1` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchCriteria {
    min_age: Option<i64>,
    max_age: Option<i64>,
    page: usize,
    page_size: usize,
}

impl SearchCriteria {
    /// Zero `page` / `page_size` are bumped to 1.
    pub fn new(min_age: Option<i64>, max_age: Option<i64>, page: usize, page_size: usize) -> Self {
        Self {
            min_age,
            max_age,
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn min_age(&self) -> Option<i64> {
        self.min_age
    }

    pub fn max_age(&self) -> Option<i64> {
        self.max_age
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Absent bounds never exclude anything. Contradictory bounds
    /// (min > max) exclude everything.
    pub fn matches_age(&self, age: i64) -> bool {
        self.min_age.is_none_or(|min| age >= min) && self.max_age.is_none_or(|max| age <= max)
    }

    /// Number of filtered items that precede this page.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

/// Paging defaults and the hard cap on work per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPolicy {
    default_page_size: usize,
    max_page_size: usize,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

impl SearchPolicy {
    /// `max_page_size` is raised to `default_page_size` if smaller; both are at least 1.
    pub fn new(default_page_size: usize, max_page_size: usize) -> Self {
        let default_page_size = default_page_size.max(1);
        Self {
            default_page_size,
            max_page_size: max_page_size.max(default_page_size),
        }
    }

    pub fn default_page_size(&self) -> usize {
        self.default_page_size
    }

    pub fn max_page_size(&self) -> usize {
        self.max_page_size
    }

    pub fn resolve(&self, raw: &SearchRequest) -> SearchCriteria {
        let page = match raw.page {
            Some(p) if p > 0 => usize::try_from(p).unwrap_or(usize::MAX),
            _ => 1,
        };

        let page_size = match raw.page_size {
            Some(s) if s > 0 => usize::try_from(s)
                .unwrap_or(usize::MAX)
                .min(self.max_page_size),
            _ => self.default_page_size,
        };

        SearchCriteria::new(raw.min_age, raw.max_age, page, page_size)
    }
}
