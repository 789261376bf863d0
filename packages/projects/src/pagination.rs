// ABOUTME: Load-more pagination over filtered lists
// ABOUTME: Pages are 1-indexed and a page request returns everything up to that page

use serde::{Deserialize, Serialize};

/// Default number of items revealed per "load more"
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Maximum page size to prevent oversized responses
pub const MAX_PAGE_SIZE: usize = 100;

/// Minimum page number (1-indexed)
pub const MIN_PAGE: usize = 1;

/// Query parameters for pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageParams {
    /// Page number (1-indexed, defaults to 1)
    #[serde(default = "default_page")]
    pub page: usize,

    /// Items per page (defaults to DEFAULT_PAGE_SIZE, max MAX_PAGE_SIZE)
    #[serde(default = "default_page_size", rename = "pageSize")]
    pub page_size: usize,
}

fn default_page() -> usize {
    MIN_PAGE
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl PageParams {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self { page, page_size }
    }

    /// First page at the given size
    pub fn first(page_size: usize) -> Self {
        Self::new(MIN_PAGE, page_size)
    }

    /// Normalized (page, page_size)
    pub fn validate(&self) -> (usize, usize) {
        let page = self.page.max(MIN_PAGE);
        let page_size = self.page_size.clamp(1, MAX_PAGE_SIZE);
        (page, page_size)
    }

    pub fn page(&self) -> usize {
        self.validate().0
    }

    pub fn page_size(&self) -> usize {
        self.validate().1
    }

    /// Exclusive end index of the accumulated window for `total` items
    pub fn window_end(&self, total: usize) -> usize {
        let (page, page_size) = self.validate();
        page.saturating_mul(page_size).min(total)
    }

    /// Index range of this page alone
    pub fn page_range(&self, total: usize) -> std::ops::Range<usize> {
        let (page, page_size) = self.validate();
        let start = ((page - 1).saturating_mul(page_size)).min(total);
        start..self.window_end(total)
    }

    /// Whether items remain past this page
    pub fn has_more(&self, total: usize) -> bool {
        let (page, page_size) = self.validate();
        page.saturating_mul(page_size) < total
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// Metadata about the revealed window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: usize,

    #[serde(rename = "pageSize")]
    pub page_size: usize,

    /// Number of items after filtering
    #[serde(rename = "totalItems")]
    pub total_items: usize,

    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

impl PageMeta {
    pub fn new(params: &PageParams, total_items: usize) -> Self {
        Self {
            page: params.page(),
            page_size: params.page_size(),
            total_items,
            has_more: params.has_more(total_items),
        }
    }
}

/// Items `[0, page * page_size)` with their metadata
pub fn paginate<T: Clone>(items: &[T], params: &PageParams) -> (Vec<T>, PageMeta) {
    let end = params.window_end(items.len());
    (items[..end].to_vec(), PageMeta::new(params, items.len()))
}
