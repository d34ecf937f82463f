//! Streaming interaction sink backed by Redis Streams.

use async_trait::async_trait;
use chrono::Utc;
use metrics::counter;
use redis::aio::ConnectionManager;
use redis::streams::{StreamMaxlen, StreamRangeReply};
use redis::AsyncCommands;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::db::Database;
use crate::error::{ErrorCode, Result, StoreError};
use crate::events::{Aggregate, CartAggregate, CartLine, InteractionEvent};
use crate::tracking::{InteractionCounts, InteractionSink};

/// Entries fetched per XRANGE call when replaying the stream.
const REPLAY_BATCH: usize = 1000;

/// Decide whether replay needs another XRANGE call after a batch, and from
/// which cursor.
///
/// A short batch means the stream is exhausted. A full batch continues from
/// an exclusive cursor on the last seen entry id, so the boundary entry is
/// not visited twice.
fn replay_continuation(batch_len: usize, last_id: Option<&str>) -> Option<String> {
    match last_id {
        Some(id) if batch_len == REPLAY_BATCH => Some(format!("({}", id)),
        _ => None,
    }
}

/// Sink that publishes events to a Redis Stream instead of relational tables.
///
/// Publishes are handed off to a background task, so request handling never
/// waits on the stream; a failed append is logged and counted but does not
/// fail the request. Reads replay the stream: cart state folds the events
/// through [`CartAggregate`], and the analytics totals tally event kinds.
pub struct StreamSink {
    conn: ConnectionManager,
    stream_key: String,
    maxlen: usize,
    db: Database,
}

impl StreamSink {
    /// Connect to Redis and verify the connection with a ping.
    pub async fn connect(
        url: &str,
        stream_key: String,
        maxlen: usize,
        db: Database,
    ) -> Result<Self> {
        let client = redis::Client::open(url).map_err(|e| {
            StoreError::with_internal(
                ErrorCode::StreamConnectionFailed,
                "Failed to create Redis client",
                e.to_string(),
            )
        })?;

        let mut conn = ConnectionManager::new(client).await.map_err(|e| {
            StoreError::with_internal(
                ErrorCode::StreamConnectionFailed,
                "Failed to connect to Redis",
                e.to_string(),
            )
        })?;

        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| {
                StoreError::with_internal(
                    ErrorCode::StreamConnectionFailed,
                    "Redis ping failed",
                    e.to_string(),
                )
            })?;

        info!(stream_key = %stream_key, "Interaction stream sink connected");

        Ok(Self {
            conn,
            stream_key,
            maxlen,
            db,
        })
    }

    /// Replay the full stream in order, visiting each decodable event.
    ///
    /// Entries with a missing or undecodable payload are logged and skipped
    /// so that one bad producer cannot wedge every read.
    async fn replay<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(&InteractionEvent),
    {
        let mut conn = self.conn.clone();
        let mut start = "-".to_string();

        loop {
            let reply: StreamRangeReply = conn
                .xrange_count(&self.stream_key, &start, "+", REPLAY_BATCH)
                .await?;

            for entry in &reply.ids {
                let Some(payload) = entry.get::<String>("event") else {
                    warn!(stream_id = %entry.id, "Stream entry missing event payload");
                    continue;
                };
                match serde_json::from_str::<InteractionEvent>(&payload) {
                    Ok(event) => visit(&event),
                    Err(e) => {
                        warn!(stream_id = %entry.id, error = %e, "Undecodable stream entry skipped");
                    }
                }
            }

            match replay_continuation(reply.ids.len(), reply.ids.last().map(|e| e.id.as_str())) {
                Some(next) => start = next,
                None => break,
            }
        }

        Ok(())
    }
}

#[async_trait]
impl InteractionSink for StreamSink {
    async fn publish(&self, event: InteractionEvent) -> Result<()> {
        let event_type = event.event_type();
        let payload = serde_json::to_string(&event)?;
        let occurred_at = Utc::now().to_rfc3339();

        let mut conn = self.conn.clone();
        let stream_key = self.stream_key.clone();
        let maxlen = self.maxlen;

        tokio::spawn(async move {
            let fields = [
                ("event", payload.as_str()),
                ("event_type", event_type),
                ("occurred_at", occurred_at.as_str()),
            ];
            let appended: redis::RedisResult<String> = conn
                .xadd_maxlen(&stream_key, StreamMaxlen::Approx(maxlen), "*", &fields)
                .await;

            match appended {
                Ok(id) => {
                    debug!(stream_id = %id, event_type, "Interaction event appended to stream");
                    counter!(
                        "mykart_interactions_published_total",
                        "sink" => "stream",
                        "event_type" => event_type,
                    )
                    .increment(1);
                }
                Err(e) => {
                    warn!(error = %e, event_type, "Failed to append interaction event to stream");
                    counter!("mykart_stream_publish_failures_total").increment(1);
                }
            }
        });

        Ok(())
    }

    async fn cart_state(&self) -> Result<Vec<CartLine>> {
        let mut cart = CartAggregate::default();
        self.replay(|event| cart.apply(event)).await?;

        let held = cart.positive_quantities();
        if held.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = held.iter().map(|(id, _)| *id).collect();
        let products: HashMap<i64, _> = self
            .db
            .get_products_by_ids(&ids)
            .await?
            .into_iter()
            .map(|p| (p.product_id, p))
            .collect();

        let mut lines = Vec::with_capacity(held.len());
        for (product_id, quantity) in held {
            // An id in the stream with no catalog row yields no line, the
            // same way the relational join drops it.
            let Some(product) = products.get(&product_id) else {
                warn!(product_id, "Cart references unknown product");
                continue;
            };
            lines.push(CartLine {
                product_id,
                name: product.name.clone(),
                price: product.price,
                image_url: product.image_url.clone(),
                quantity,
            });
        }

        Ok(lines)
    }

    async fn interaction_counts(&self) -> Result<InteractionCounts> {
        let mut counts = InteractionCounts::default();
        self.replay(|event| counts.record(event)).await?;
        Ok(counts)
    }

    fn name(&self) -> &'static str {
        "stream"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_batch_continues_past_last_entry() {
        let next = replay_continuation(REPLAY_BATCH, Some("1692345678901-4"));
        assert_eq!(next.as_deref(), Some("(1692345678901-4"));
    }

    #[test]
    fn test_short_batch_ends_replay() {
        assert_eq!(replay_continuation(REPLAY_BATCH - 1, Some("1692345678901-4")), None);
        assert_eq!(replay_continuation(1, Some("0-1")), None);
    }

    #[test]
    fn test_empty_batch_ends_replay() {
        assert_eq!(replay_continuation(0, None), None);
    }
}
