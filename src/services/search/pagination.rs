/*
 * Responsibility
 * - 候補列に SearchCriteria を適用し、1 ページ分 + ページング情報 (PageResult) を返す
 * - 入力順を保つ (再ソートしない)。同じ入力 → 同じ出力
 */
use super::criteria::SearchCriteria;

/// An item that can be filtered by age.
pub trait Candidate {
    fn age(&self) -> i64;
}

/// One page of results plus its position within the whole filtered set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> PageResult<T> {
    /// Convert every item, keeping the envelope. Stops at the first error.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<PageResult<U>, E> {
        Ok(PageResult {
            items: self.items.into_iter().map(f).collect::<Result<_, _>>()?,
            total_count: self.total_count,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_previous: self.has_previous,
        })
    }
}

/// Filter `candidates` by `criteria` and cut out the requested page.
///
/// Single pass; only the requested window is kept in memory. A page past the
/// end yields no items but a correct envelope.
pub fn paginate<T, I>(candidates: I, criteria: &SearchCriteria) -> PageResult<T>
where
    T: Candidate,
    I: IntoIterator<Item = T>,
{
    let offset = criteria.offset();
    let page_size = criteria.page_size();

    let mut total_count = 0usize;
    let mut items = Vec::new();

    for candidate in candidates {
        if !criteria.matches_age(candidate.age()) {
            continue;
        }
        if total_count >= offset && items.len() < page_size {
            items.push(candidate);
        }
        total_count += 1;
    }

    let page = criteria.page();
    let total_pages = total_count.div_ceil(page_size);

    PageResult {
        items,
        total_count,
        page,
        page_size,
        total_pages,
        has_next: page < total_pages,
        has_previous: page > 1,
    }
}
