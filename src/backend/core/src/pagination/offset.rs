//! Offset-based pagination for page-based catalog navigation.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, StoreError};

// ═══════════════════════════════════════════════════════════════════════════════
// Page Metadata
// ═══════════════════════════════════════════════════════════════════════════════

/// Metadata about a paginated result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Current page number (1-indexed).
    pub page: u64,
    /// Number of items per page.
    pub limit: u64,
    /// Total number of items across all pages.
    pub total_items: u64,
    /// Total number of pages.
    pub total_pages: u64,
    /// Whether there is a previous page.
    pub has_previous: bool,
    /// Whether there is a next page.
    pub has_next: bool,
}

impl PageMetadata {
    /// Create page metadata from pagination parameters and total count.
    ///
    /// The page number is echoed as requested (minimum 1), never snapped to
    /// the last page: a request beyond the end pairs an empty result set
    /// with metadata that still names the page the client asked for.
    pub fn new(page: u64, limit: u64, total_items: u64) -> Self {
        let total_pages = if total_items == 0 {
            1
        } else {
            total_items.div_ceil(limit)
        };

        let page = page.max(1);
        let has_previous = page > 1;
        let has_next = page < total_pages;

        Self {
            page,
            limit,
            total_items,
            total_pages,
            has_previous,
            has_next,
        }
    }

    /// Get the previous page number if available.
    pub fn previous_page(&self) -> Option<u64> {
        self.has_previous.then(|| self.page - 1)
    }

    /// Get the next page number if available.
    pub fn next_page(&self) -> Option<u64> {
        self.has_next.then(|| self.page + 1)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Offset Pagination
// ═══════════════════════════════════════════════════════════════════════════════

/// Offset-based pagination parameters.
///
/// Construction clamps out-of-range values rather than rejecting them, so a
/// request for page 0 or an oversized limit still yields a usable window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetPagination {
    /// Current page number (1-indexed).
    pub page: u64,
    /// Number of items per page.
    pub limit: u64,
}

impl OffsetPagination {
    /// Create a new offset pagination with the given page and limit.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(super::MIN_PAGE_NUMBER),
            limit: limit.clamp(1, super::MAX_PAGE_SIZE),
        }
    }

    /// Build from optional query parameters, applying defaults.
    pub fn from_params(page: Option<u64>, limit: Option<u64>) -> Self {
        Self::new(
            page.unwrap_or(super::MIN_PAGE_NUMBER),
            limit.unwrap_or(super::DEFAULT_PAGE_SIZE),
        )
    }

    /// Get the SQL OFFSET value.
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }

    /// Get the SQL LIMIT value.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Create page metadata from a total count.
    pub fn metadata(&self, total_items: u64) -> PageMetadata {
        PageMetadata::new(self.page, self.limit, total_items)
    }

    /// Validate the pagination parameters.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.page < 1 {
            return Err(StoreError::new(
                ErrorCode::InvalidInput,
                "Page number must be at least 1",
            ));
        }

        if self.limit < 1 {
            return Err(StoreError::new(
                ErrorCode::InvalidInput,
                "Items per page must be at least 1",
            ));
        }

        if self.limit > super::MAX_PAGE_SIZE {
            return Err(StoreError::new(
                ErrorCode::InvalidInput,
                format!("Items per page cannot exceed {}", super::MAX_PAGE_SIZE),
            ));
        }

        Ok(())
    }
}

impl Default for OffsetPagination {
    fn default() -> Self {
        Self {
            page: super::MIN_PAGE_NUMBER,
            limit: super::DEFAULT_PAGE_SIZE,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_metadata_basic() {
        let meta = PageMetadata::new(1, 10, 100);

        assert_eq!(meta.page, 1);
        assert_eq!(meta.limit, 10);
        assert_eq!(meta.total_items, 100);
        assert_eq!(meta.total_pages, 10);
        assert!(!meta.has_previous);
        assert!(meta.has_next);
    }

    #[test]
    fn test_page_metadata_last_page() {
        let meta = PageMetadata::new(10, 10, 100);

        assert_eq!(meta.page, 10);
        assert!(meta.has_previous);
        assert!(!meta.has_next);
        assert_eq!(meta.next_page(), None);
        assert_eq!(meta.previous_page(), Some(9));
    }

    #[test]
    fn test_page_metadata_partial_last_page() {
        let meta = PageMetadata::new(3, 10, 25);

        assert_eq!(meta.page, 3);
        assert_eq!(meta.total_pages, 3);
        assert!(!meta.has_next);
    }

    #[test]
    fn test_page_metadata_empty() {
        let meta = PageMetadata::new(1, 10, 0);

        assert_eq!(meta.page, 1);
        assert_eq!(meta.total_pages, 1);
        assert!(!meta.has_previous);
        assert!(!meta.has_next);
    }

    #[test]
    fn test_page_beyond_last_is_echoed() {
        // A page past the end corresponds to an empty result window; the
        // metadata must still report the requested page.
        let meta = PageMetadata::new(100, 10, 50);

        assert_eq!(meta.page, 100);
        assert_eq!(meta.total_pages, 5);
        assert!(meta.has_previous);
        assert!(!meta.has_next);
    }

    #[test]
    fn test_offset_pagination_basic() {
        let pagination = OffsetPagination::new(1, 20);

        assert_eq!(pagination.offset(), 0);
        assert_eq!(pagination.limit(), 20);
    }

    #[test]
    fn test_offset_pagination_page_2() {
        let pagination = OffsetPagination::new(2, 20);

        assert_eq!(pagination.offset(), 20);
        assert_eq!(pagination.limit(), 20);
    }

    #[test]
    fn test_offset_pagination_clamps_values() {
        let pagination = OffsetPagination::new(0, 500);

        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.limit, crate::pagination::MAX_PAGE_SIZE);
    }

    #[test]
    fn test_offset_pagination_from_params_defaults() {
        let pagination = OffsetPagination::from_params(None, None);

        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.limit, crate::pagination::DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_offset_pagination_validate() {
        let valid = OffsetPagination::new(1, 20);
        assert!(valid.validate().is_ok());
    }

    #[test]
    fn test_offset_pagination_metadata() {
        let pagination = OffsetPagination::new(2, 10);
        let meta = pagination.metadata(45);

        assert_eq!(meta.page, 2);
        assert_eq!(meta.limit, 10);
        assert_eq!(meta.total_items, 45);
        assert_eq!(meta.total_pages, 5);
        assert!(meta.has_previous);
        assert!(meta.has_next);
    }
}
