use serde::Serialize;

use super::ListingRequest;

/// Position of a page within the whole result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PageMeta {
    /// Derives page count and boundary flags.
    ///
    /// A page index past the end is not an error: it simply has no next page.
    pub fn compute(request: &ListingRequest, total_elements: usize) -> Self {
        let total_pages = if total_elements == 0 {
            0
        } else {
            total_elements.div_ceil(request.page_size.max(1))
        };

        Self {
            total_pages,
            has_next: request.page_index.saturating_add(1) < total_pages,
            has_previous: request.page_index > 0,
        }
    }

    /// Index of the last page, clamped to 0 for an empty result set.
    pub fn last_index(&self) -> usize {
        self.total_pages.saturating_sub(1)
    }
}

/// A bounded, ordered slice of a larger result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_index: usize,
    pub page_size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn new(request: &ListingRequest, items: Vec<T>, total_elements: usize, meta: &PageMeta) -> Self {
        debug_assert!(items.len() <= request.page_size);
        Self {
            items,
            page_index: request.page_index,
            page_size: request.page_size,
            total_elements,
            total_pages: meta.total_pages,
        }
    }
}
