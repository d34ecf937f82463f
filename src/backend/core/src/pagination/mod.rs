//! Pagination support for catalog listings.
//!
//! The storefront uses classic offset pagination: `?page=` and `?limit=`
//! query parameters, a SQL OFFSET/LIMIT window, and a `pagination` object in
//! the response describing the result set.

mod offset;
mod response;

pub use offset::{OffsetPagination, PageMetadata};
pub use response::PageInfo;

/// Default page size if not specified.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Maximum allowed page size.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Minimum page number (1-indexed).
pub const MIN_PAGE_NUMBER: u64 = 1;
