#![allow(clippy::result_large_err)]
//! # MyKart Core
//!
//! Backend for the MyKart storefront: a paginated product catalog with a
//! cart and checkout, backed by PostgreSQL.
//!
//! ## Architecture
//!
//! - **Catalog**: Product listing, lookup, and insertion over `sqlx`
//! - **Events**: Append-only interaction events (page hits, clicks,
//!   impressions, cart events) and signed-sum cart reconstruction
//! - **Tracking**: Switchable interaction sink -- synchronous relational
//!   writes or asynchronous Redis stream publishes
//! - **Pagination**: Offset-based pagination utilities
//! - **Observability**: Structured logging, optional OTLP tracing, and
//!   Prometheus metrics

pub mod api;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod observability;
pub mod pagination;
pub mod tracking;

pub use error::{ErrorCode, ErrorContext, ErrorResponse, ErrorSeverity, Result, StoreError};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::catalog::{NewProduct, Product};
    pub use crate::db::Database;
    pub use crate::error::{ErrorCode, ErrorContext, Result, StoreError};
    pub use crate::events::{Aggregate, CartAction, CartAggregate, CartLine, InteractionEvent};
    pub use crate::pagination::{OffsetPagination, PageInfo, PageMetadata};
    pub use crate::tracking::{InteractionCounts, InteractionSink, RelationalSink, StreamSink};
}
