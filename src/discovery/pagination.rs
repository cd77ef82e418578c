//! Offset pagination over any filterable, countable collection
//!
//! Pages are 1-indexed. `total_records` and `total_pages` always describe the
//! unsliced collection, so a page past the end is simply empty.

use tracing::debug;

use crate::db::PageSource;
use crate::error::{DiscoveryError, Result};

/// A validated page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl PageRequest {
    /// Validate a 1-indexed page number and a page size
    pub fn new(page: i64, limit: i64) -> Result<Self> {
        if page < 1 {
            return Err(DiscoveryError::invalid_argument(format!(
                "page must be at least 1, got {}",
                page
            )));
        }
        if limit < 1 {
            return Err(DiscoveryError::invalid_argument(format!(
                "limit must be at least 1, got {}",
                limit
            )));
        }
        Ok(Self { page, limit })
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Index of the first record on this page
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// One page of results plus totals for the whole collection
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub total_records: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Assemble a page from an already sliced result window
    pub fn new(request: PageRequest, total_records: i64, results: Vec<T>) -> Self {
        Self {
            total_records,
            page: request.page,
            limit: request.limit,
            total_pages: total_pages(total_records, request.limit),
            results,
        }
    }

    /// Slice a fully materialized, already ordered list
    pub fn from_window(request: PageRequest, items: Vec<T>) -> Self {
        let total_records = items.len() as i64;
        let (start, end) = window_bounds(request, items.len());
        let results = items
            .into_iter()
            .skip(start)
            .take(end - start)
            .collect();
        Self::new(request, total_records, results)
    }

    /// Convert the result items, keeping the totals
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            total_records: self.total_records,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

/// `ceil(total_records / limit)`
pub fn total_pages(total_records: i64, limit: i64) -> i64 {
    if limit <= 0 || total_records <= 0 {
        return 0;
    }
    (total_records + limit - 1) / limit
}

/// Half-open `[start, end)` indices of a page within `len` items
fn window_bounds(request: PageRequest, len: usize) -> (usize, usize) {
    let start = usize::try_from(request.offset()).unwrap_or(usize::MAX).min(len);
    let limit = usize::try_from(request.limit).unwrap_or(usize::MAX);
    let end = start.saturating_add(limit).min(len);
    (start, end)
}

/// Fetch one page from `source`, applying `filter` to both the slice and the count
pub async fn paginate<F, T, S>(source: &S, filter: &F, request: PageRequest) -> Result<Page<T>>
where
    F: Send + Sync,
    T: Send,
    S: PageSource<F, T> + ?Sized,
{
    let results =
        PageSource::<F, T>::fetch(source, filter, request.offset(), request.limit()).await?;
    let total_records = PageSource::<F, T>::count(source, filter).await?;

    debug!(
        page = request.page(),
        limit = request.limit(),
        total_records,
        returned = results.len(),
        "Paginated collection"
    );

    Ok(Page::new(request, total_records, results))
}
