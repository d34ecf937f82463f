//! Relational interaction sink backed by PostgreSQL tables.

use async_trait::async_trait;
use metrics::counter;

use crate::db::Database;
use crate::error::Result;
use crate::events::{CartLine, InteractionEvent};
use crate::tracking::{InteractionCounts, InteractionSink};

/// Sink that writes each interaction event into its own table.
///
/// Writes are awaited inline with the request, so a failed insert surfaces as
/// a request error. Cart state comes from the signed-sum aggregation over the
/// `cart_events` table.
pub struct RelationalSink {
    db: Database,
}

impl RelationalSink {
    /// Create a sink over the given database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl InteractionSink for RelationalSink {
    async fn publish(&self, event: InteractionEvent) -> Result<()> {
        let event_type = event.event_type();
        match event {
            InteractionEvent::PageHit { page } => self.db.insert_page_hit(&page).await?,
            InteractionEvent::ProductClick { product_id } => {
                self.db.insert_click(product_id).await?
            }
            InteractionEvent::Impression { product_id } => {
                self.db.insert_impression(product_id).await?
            }
            InteractionEvent::Cart {
                product_id,
                quantity,
                action,
            } => self.db.insert_cart_event(product_id, quantity, action).await?,
        }

        counter!(
            "mykart_interactions_published_total",
            "sink" => "relational",
            "event_type" => event_type,
        )
        .increment(1);

        Ok(())
    }

    async fn cart_state(&self) -> Result<Vec<CartLine>> {
        self.db.cart_contents().await
    }

    async fn interaction_counts(&self) -> Result<InteractionCounts> {
        self.db.relational_interaction_counts().await
    }

    fn name(&self) -> &'static str {
        "relational"
    }
}
