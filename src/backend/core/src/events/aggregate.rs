//! Aggregate trait and the cart aggregate for event-log reconstruction.
//!
//! Aggregates are domain objects rebuilt from a stream of events. Each
//! aggregate implements `Default` (empty state) and `apply` (fold an event).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::event::InteractionEvent;

// =============================================================================
// Aggregate Trait
// =============================================================================

/// Trait for aggregates that can be reconstructed from a sequence of events.
///
/// An aggregate starts at its `Default` state and folds each event via
/// `apply`. Given the same event sequence, the resulting state is
/// deterministic.
pub trait Aggregate: Default {
    /// Apply a single event to mutate state.
    ///
    /// Implementations must be pure functions of `(self, event) -> self'`.
    /// They must not perform I/O or fail -- every persisted event is valid by
    /// definition.
    fn apply(&mut self, event: &InteractionEvent);
}

// =============================================================================
// Cart Aggregate
// =============================================================================

/// Current cart contents derived from the cart-event log.
///
/// The in-memory counterpart of the relational signed-sum aggregation:
/// `added`/`increased` add the quantity, `removed`/`decreased` subtract it,
/// and products whose total is not positive are dropped from the result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartAggregate {
    /// Signed quantity totals per product, including non-positive ones.
    quantities: BTreeMap<i64, i64>,
    /// Number of events applied.
    pub version: u64,
}

impl Aggregate for CartAggregate {
    fn apply(&mut self, event: &InteractionEvent) {
        self.version += 1;

        // Non-cart interactions carry no cart state.
        if let InteractionEvent::Cart {
            product_id,
            quantity,
            action,
        } = event
        {
            *self.quantities.entry(*product_id).or_insert(0) += action.signed_delta(*quantity);
        }
    }
}

impl CartAggregate {
    /// Fold a sequence of events into a cart aggregate.
    pub fn from_events<'a, I: IntoIterator<Item = &'a InteractionEvent>>(events: I) -> Self {
        let mut agg = Self::default();
        for event in events {
            agg.apply(event);
        }
        agg
    }

    /// The signed quantity total for a product, if any event mentioned it.
    pub fn quantity(&self, product_id: i64) -> Option<i64> {
        self.quantities.get(&product_id).copied()
    }

    /// Per-product totals with non-positive sums filtered out, ordered by
    /// product id.
    ///
    /// This mirrors the `HAVING SUM(...) > 0` clause of the relational
    /// reconstruction query.
    pub fn positive_quantities(&self) -> Vec<(i64, i64)> {
        self.quantities
            .iter()
            .filter(|(_, qty)| **qty > 0)
            .map(|(id, qty)| (*id, *qty))
            .collect()
    }

    /// Whether the cart holds no products with a positive quantity.
    pub fn is_empty(&self) -> bool {
        self.quantities.values().all(|qty| *qty <= 0)
    }
}

// =============================================================================
// Cart Lines
// =============================================================================

/// One line of reconstructed cart contents, joined with product details.
///
/// Field names match the columns of the relational reconstruction query so
/// both sinks produce the same wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CartLine {
    pub product_id: i64,
    pub name: String,
    pub price: f64,
    pub image_url: Option<String>,
    pub quantity: i64,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::event::CartAction;

    fn cart(product_id: i64, quantity: i64, action: CartAction) -> InteractionEvent {
        InteractionEvent::cart(product_id, quantity, action)
    }

    #[test]
    fn test_adds_and_removals_fold_to_signed_sum() {
        let events = vec![
            cart(1, 2, CartAction::Added),
            cart(1, 1, CartAction::Increased),
            cart(1, 1, CartAction::Removed),
            cart(2, 1, CartAction::Added),
        ];

        let agg = CartAggregate::from_events(&events);

        assert_eq!(agg.quantity(1), Some(2));
        assert_eq!(agg.quantity(2), Some(1));
        assert_eq!(agg.version, 4);
        assert_eq!(agg.positive_quantities(), vec![(1, 2), (2, 1)]);
    }

    #[test]
    fn test_non_positive_totals_are_filtered() {
        let events = vec![
            cart(1, 1, CartAction::Added),
            cart(1, 3, CartAction::Removed),
            cart(2, 2, CartAction::Added),
            cart(2, 2, CartAction::Decreased),
        ];

        let agg = CartAggregate::from_events(&events);

        // Totals go negative/zero but never surface in the result set.
        assert_eq!(agg.quantity(1), Some(-2));
        assert_eq!(agg.quantity(2), Some(0));
        assert!(agg.positive_quantities().is_empty());
        assert!(agg.is_empty());
    }

    #[test]
    fn test_non_cart_events_only_bump_version() {
        let events = vec![
            InteractionEvent::page_hit("products"),
            InteractionEvent::Impression { product_id: 5 },
            InteractionEvent::ProductClick { product_id: 5 },
        ];

        let agg = CartAggregate::from_events(&events);

        assert_eq!(agg.version, 3);
        assert!(agg.is_empty());
    }

    #[test]
    fn test_deterministic_reconstruction() {
        let events = vec![
            cart(3, 4, CartAction::Added),
            cart(3, 1, CartAction::Decreased),
            cart(9, 2, CartAction::Added),
        ];

        let a = CartAggregate::from_events(&events);
        let b = CartAggregate::from_events(&events);

        assert_eq!(a.positive_quantities(), b.positive_quantities());
        assert_eq!(a.positive_quantities(), vec![(3, 3), (9, 2)]);
    }

    #[test]
    fn test_results_ordered_by_product_id() {
        let events = vec![
            cart(42, 1, CartAction::Added),
            cart(7, 1, CartAction::Added),
            cart(19, 1, CartAction::Added),
        ];

        let agg = CartAggregate::from_events(&events);
        let ids: Vec<i64> = agg.positive_quantities().iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![7, 19, 42]);
    }
}
