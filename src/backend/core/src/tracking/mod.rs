//! User-interaction tracking sinks.
//!
//! This module provides pluggable destinations for interaction events:
//! - **RelationalSink**: Writes each event into its PostgreSQL table inline
//!   with the request
//! - **StreamSink**: Publishes events to a Redis Stream without blocking
//!   request handling, and reconstructs cart state by replaying the stream
//!
//! Both sinks answer the same two read questions: what is in the cart right
//! now, and how many interactions of each kind have been recorded.

mod relational;
mod stream;

pub use relational::RelationalSink;
pub use stream::StreamSink;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::{RedisConfig, SinkKind, TrackingConfig};
use crate::db::Database;
use crate::error::Result;
use crate::events::{CartLine, InteractionEvent};

// ═══════════════════════════════════════════════════════════════════════════════
// Interaction Counts
// ═══════════════════════════════════════════════════════════════════════════════

/// Totals of recorded interactions, broken down by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionCounts {
    /// Number of page hits.
    pub page_hits: u64,

    /// Number of product clicks.
    pub clicks: u64,

    /// Number of product impressions.
    pub impressions: u64,

    /// Number of cart events (all actions combined).
    pub cart_events: u64,
}

impl InteractionCounts {
    /// Tally one event into the counts.
    pub fn record(&mut self, event: &InteractionEvent) {
        match event {
            InteractionEvent::PageHit { .. } => self.page_hits += 1,
            InteractionEvent::ProductClick { .. } => self.clicks += 1,
            InteractionEvent::Impression { .. } => self.impressions += 1,
            InteractionEvent::Cart { .. } => self.cart_events += 1,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Interaction Sink Trait
// ═══════════════════════════════════════════════════════════════════════════════

/// Destination for user-interaction events.
///
/// `publish` delivery semantics differ by sink: the relational sink completes
/// the write before returning, so a storage failure fails the request; the
/// stream sink hands the event off and returns immediately.
#[async_trait]
pub trait InteractionSink: Send + Sync {
    /// Record an interaction event.
    async fn publish(&self, event: InteractionEvent) -> Result<()>;

    /// Current cart contents, derived from the event history this sink holds.
    async fn cart_state(&self) -> Result<Vec<CartLine>>;

    /// Interaction totals for the analytics summary.
    async fn interaction_counts(&self) -> Result<InteractionCounts>;

    /// The sink name, used in logs and metrics labels.
    fn name(&self) -> &'static str;
}

/// Build the configured sink.
pub async fn build_sink(
    tracking: &TrackingConfig,
    redis: &RedisConfig,
    db: Database,
) -> Result<Arc<dyn InteractionSink>> {
    match tracking.sink {
        SinkKind::Relational => Ok(Arc::new(RelationalSink::new(db))),
        SinkKind::Stream => {
            let sink = StreamSink::connect(
                &redis.url,
                tracking.stream_key.clone(),
                tracking.stream_maxlen,
                db,
            )
            .await?;
            Ok(Arc::new(sink))
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::CartAction;

    #[test]
    fn test_counts_record_by_kind() {
        let mut counts = InteractionCounts::default();
        counts.record(&InteractionEvent::page_hit("products"));
        counts.record(&InteractionEvent::page_hit("cart"));
        counts.record(&InteractionEvent::ProductClick { product_id: 1 });
        counts.record(&InteractionEvent::Impression { product_id: 1 });
        counts.record(&InteractionEvent::cart(1, 2, CartAction::Added));

        assert_eq!(
            counts,
            InteractionCounts {
                page_hits: 2,
                clicks: 1,
                impressions: 1,
                cart_events: 1,
            }
        );
    }
}
