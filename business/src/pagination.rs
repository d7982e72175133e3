//! Page bookkeeping for entity tables.
//!
//! [`PaginationState`] is owned by the table state and only changes through
//! its explicit page/size operations or when a fetched page is applied.
//! [`PaginationView`] is the read-only projection handed to the pagination
//! control, which answers with a [`PaginationEvent`] instead of mutating.

use crate::api::PageData;

pub const PAGE_SIZE_OPTIONS: [u32; 3] = [10, 25, 100];
pub const DEFAULT_PAGE_SIZE: u32 = PAGE_SIZE_OPTIONS[0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationEvent {
    PageChanged(u32),
    PageSizeChanged(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    /// One-based.
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_elements: u64,
    /// Index of the first row of the current page.
    pub offset: u64,
    /// Rows actually present on the current page.
    pub shown: u32,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PaginationState {
    pub fn new(page_size: u32) -> Self {
        Self {
            current_page: 1,
            page_size,
            total_pages: 0,
            total_elements: 0,
            offset: 0,
            shown: 0,
        }
    }

    /// Move to `page`. Returns whether the page actually changed.
    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        if page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    /// Change the page size, always going back to the first page.
    /// Returns whether a new fetch is needed.
    pub fn set_page_size(&mut self, size: u32) -> bool {
        let size = size.max(1);
        let changed = size != self.page_size || self.current_page != 1;
        self.page_size = size;
        self.current_page = 1;
        changed
    }

    /// Take every pagination field from a fetched page at once. The current
    /// page comes from the server's zero-based page number, which may differ
    /// from the requested one if the server clamped it.
    pub fn apply(&mut self, page: &PageData) {
        *self = Self {
            current_page: page.pageable.page_number.saturating_add(1),
            page_size: page.pageable.page_size,
            total_pages: page.total_pages,
            total_elements: page.total_elements,
            offset: page.pageable.offset,
            shown: u32::try_from(page.content.len()).unwrap_or(u32::MAX),
        };
    }

    pub fn view(&self) -> PaginationView {
        PaginationView {
            current_page: self.current_page,
            total_pages: self.total_pages,
            page_size: self.page_size,
            total_elements: self.total_elements,
            offset: self.offset,
            shown: self.shown,
        }
    }
}

/// What the pagination control renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationView {
    pub current_page: u32,
    pub total_pages: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub offset: u64,
    pub shown: u32,
}

impl PaginationView {
    pub fn can_go_back(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_go_forward(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// One-based inclusive row range shown on this page, `(0, 0)` when empty.
    pub fn range(&self) -> (u64, u64) {
        if self.total_elements == 0 || self.shown == 0 {
            return (0, 0);
        }
        let from = self.offset + 1;
        let to = (self.offset + u64::from(self.shown)).min(self.total_elements);
        (from, to)
    }

    pub fn range_text(&self) -> String {
        let (from, to) = self.range();
        format!("Showing {from} to {to} of {}", self.total_elements)
    }

    pub fn page_options(&self) -> std::ops::RangeInclusive<u32> {
        1..=self.total_pages
    }

    pub fn first(&self) -> Option<PaginationEvent> {
        self.can_go_back().then_some(PaginationEvent::PageChanged(1))
    }

    pub fn previous(&self) -> Option<PaginationEvent> {
        self.can_go_back()
            .then(|| PaginationEvent::PageChanged(self.current_page - 1))
    }

    pub fn next(&self) -> Option<PaginationEvent> {
        self.can_go_forward()
            .then(|| PaginationEvent::PageChanged(self.current_page + 1))
    }

    pub fn last(&self) -> Option<PaginationEvent> {
        self.can_go_forward()
            .then_some(PaginationEvent::PageChanged(self.total_pages))
    }

    /// Emits only for pages in `[1, total_pages]`.
    pub fn select_page(&self, page: u32) -> Option<PaginationEvent> {
        (1..=self.total_pages)
            .contains(&page)
            .then_some(PaginationEvent::PageChanged(page))
    }

    pub fn select_page_size(&self, size: u32) -> PaginationEvent {
        PaginationEvent::PageSizeChanged(size)
    }
}
