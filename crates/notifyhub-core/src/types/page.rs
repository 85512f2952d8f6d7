//! Page-window math for offset/limit list requests.

use serde::{Deserialize, Serialize};

/// Maximum page size accepted by the backend list endpoint.
const MAX_PAGE_SIZE: u64 = 200;

/// A window into a server-ordered list, expressed as a 0-based page index
/// and a fixed page size.
///
/// The wire contract is `skip`/`limit`; this type owns the conversion so
/// callers never compute offsets by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    /// Page index (0-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
}

impl PageWindow {
    /// Create a new page window, clamping the size to the accepted range.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Window for the first page.
    pub fn first(page_size: u64) -> Self {
        Self::new(0, page_size)
    }

    /// The `skip` value for the wire request.
    pub fn skip(&self) -> u64 {
        self.page * self.page_size
    }

    /// The `limit` value for the wire request.
    pub fn limit(&self) -> u64 {
        self.page_size
    }

    /// The window immediately after this one.
    pub fn next(&self) -> Self {
        Self {
            page: self.page + 1,
            page_size: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_is_page_times_size() {
        let window = PageWindow::new(3, 50);
        assert_eq!(window.skip(), 150);
        assert_eq!(window.limit(), 50);
    }

    #[test]
    fn test_first_page_skips_nothing() {
        assert_eq!(PageWindow::first(50).skip(), 0);
    }

    #[test]
    fn test_page_size_is_clamped() {
        assert_eq!(PageWindow::new(0, 0).page_size, 1);
        assert_eq!(PageWindow::new(0, 10_000).page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_next_advances_page() {
        let window = PageWindow::first(50).next();
        assert_eq!(window.page, 1);
        assert_eq!(window.skip(), 50);
    }
}
