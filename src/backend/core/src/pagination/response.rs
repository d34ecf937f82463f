//! Pagination response types.

use serde::{Deserialize, Serialize};

use super::offset::PageMetadata;

/// The `pagination` object embedded in catalog listing responses.
///
/// Serialized with camelCase keys: `page`, `limit`, `total`, `totalPages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Current page number (1-indexed).
    pub page: u64,
    /// Number of items per page.
    pub limit: u64,
    /// Total number of items.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

impl PageInfo {
    /// Create page info from page metadata.
    pub fn from_metadata(meta: &PageMetadata) -> Self {
        Self {
            page: meta.page,
            limit: meta.limit,
            total: meta.total_items,
            total_pages: meta.total_pages,
        }
    }

    /// Create page info directly from parameters and a total count.
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        Self::from_metadata(&PageMetadata::new(page, limit, total))
    }
}

impl From<PageMetadata> for PageInfo {
    fn from(meta: PageMetadata) -> Self {
        Self::from_metadata(&meta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_info_wire_shape() {
        let info = PageInfo::new(2, 20, 45);
        let json = serde_json::to_value(&info).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "page": 2,
                "limit": 20,
                "total": 45,
                "totalPages": 3,
            })
        );
    }

    #[test]
    fn test_page_info_from_metadata() {
        let meta = PageMetadata::new(1, 10, 0);
        let info = PageInfo::from(meta);

        assert_eq!(info.total, 0);
        assert_eq!(info.total_pages, 1);
    }
}
