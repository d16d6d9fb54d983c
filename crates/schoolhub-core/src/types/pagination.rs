//! Pagination types for list screens.

use serde::{Deserialize, Serialize};

/// Default page size.
const DEFAULT_PAGE_SIZE: u64 = 10;
/// Largest page size a list screen accepts.
pub const MAX_PAGE_SIZE: u64 = 100;

/// The current page number and fixed page size of a list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl PageState {
    /// Create a new page state, clamping both values into range.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// First page with the given page size.
    pub fn first(page_size: u64) -> Self {
        Self::new(1, page_size)
    }

    /// Index of the first item on the current page.
    pub fn offset(&self) -> u64 {
        (self.page.saturating_sub(1)) * self.page_size
    }

    /// Number of pages needed for `total_items`; at least 1.
    pub fn total_pages(&self, total_items: u64) -> u64 {
        total_pages(total_items, self.page_size)
    }

    /// This state with the page clamped into `[1, total_pages]`.
    pub fn clamped(&self, total_items: u64) -> Self {
        Self {
            page: self.page.clamp(1, self.total_pages(total_items)),
            page_size: self.page_size,
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Number of pages for `total_items` at `page_size`.
///
/// An empty collection still has one (empty) page; callers show the
/// "no records" state through [`Page::is_empty`].
pub fn total_pages(total_items: u64, page_size: u64) -> u64 {
    let page_size = page_size.max(1);
    if total_items == 0 {
        1
    } else {
        total_items.div_ceil(page_size)
    }
}

/// One page of a filtered collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Current page number (1-based, already clamped).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
    /// Total number of items across all pages.
    pub total_items: u64,
    /// Total number of pages (1 for an empty collection).
    pub total_pages: u64,
    /// Whether there is a next page.
    pub has_next: bool,
    /// Whether there is a previous page.
    pub has_previous: bool,
}

impl<T> Page<T> {
    /// Create a page from its items and the already-clamped state.
    pub fn new(items: Vec<T>, state: PageState, total_items: u64) -> Self {
        let total_pages = state.total_pages(total_items);
        Self {
            items,
            page: state.page,
            page_size: state.page_size,
            total_items,
            total_pages,
            has_next: state.page < total_pages,
            has_previous: state.page > 1,
        }
    }

    /// Whether the filtered collection has no records at all.
    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }

    /// 1-based position of the first item on this page, 0 when empty.
    pub fn first_index(&self) -> u64 {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    /// 1-based position of the last item on this page, 0 when empty.
    pub fn last_index(&self) -> u64 {
        if self.items.is_empty() {
            0
        } else {
            self.first_index() + self.items.len() as u64 - 1
        }
    }

    /// Map the items while keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_values() {
        let state = PageState::new(0, 0);
        assert_eq!(state, PageState::new(1, 1));
        assert_eq!(PageState::new(3, 500).page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 10), 3);
    }

    #[test]
    fn test_clamped_moves_into_range() {
        let state = PageState::new(9, 10);
        assert_eq!(state.clamped(25).page, 3);
        assert_eq!(state.clamped(0).page, 1);
    }

    #[test]
    fn test_page_indices() {
        let page = Page::new(vec!['a', 'b', 'c', 'd', 'e'], PageState::new(3, 10), 25);
        assert_eq!(page.first_index(), 21);
        assert_eq!(page.last_index(), 25);
        assert!(!page.has_next);
        assert!(page.has_previous);
    }
}
