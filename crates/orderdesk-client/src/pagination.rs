//! Page navigation decisions

use orderdesk_types::Pagination;

/// Outcome of a page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDecision {
    /// Outside `1..=total_pages`; nothing happens
    Rejected,
    /// A local filter or search is in effect; the working set stays as is
    /// and pagination controls are hidden
    ServeLocal,
    /// Fetch this page from the server
    Fetch(u32),
}

/// Decides whether a page change needs a fetch
#[derive(Debug, Clone, Copy)]
pub struct PageCoordinator {
    pagination: Pagination,
}

impl PageCoordinator {
    pub fn new(pagination: Pagination) -> Self {
        Self { pagination }
    }

    /// Decide what a request for `page` does.
    ///
    /// `local_mode` is true while a local filter or an active search owns
    /// the visible rows.
    pub fn request(&self, page: u32, local_mode: bool) -> PageDecision {
        if !self.pagination.contains(page) {
            return PageDecision::Rejected;
        }
        if local_mode {
            return PageDecision::ServeLocal;
        }
        PageDecision::Fetch(page)
    }

    /// Whether pagination controls should be shown
    pub fn controls_visible(&self, local_mode: bool) -> bool {
        !local_mode && self.pagination.total_pages > 1
    }
}
