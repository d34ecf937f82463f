//! End-to-end cart reconstruction scenarios.
//!
//! The cart is never stored directly: it is a fold over the append-only
//! interaction event log. These tests replay realistic shopping sessions
//! through the aggregate and check the derived state.

use mykart_core::events::{Aggregate, CartAction, CartAggregate, InteractionEvent};
use mykart_core::tracking::InteractionCounts;

fn cart(product_id: i64, quantity: i64, action: CartAction) -> InteractionEvent {
    InteractionEvent::cart(product_id, quantity, action)
}

#[test]
fn test_shopping_session_reconstruction() {
    // Browse, add two products, bump one, shrink and drop the other.
    let events = vec![
        InteractionEvent::page_hit("products"),
        InteractionEvent::ProductClick { product_id: 1 },
        cart(1, 1, CartAction::Added),
        cart(2, 3, CartAction::Added),
        cart(1, 2, CartAction::Increased),
        cart(2, 1, CartAction::Decreased),
        cart(2, 2, CartAction::Removed),
        InteractionEvent::page_hit("cart"),
    ];

    let agg = CartAggregate::from_events(&events);

    assert_eq!(agg.quantity(1), Some(3));
    assert_eq!(agg.quantity(2), Some(0));
    assert_eq!(agg.positive_quantities(), vec![(1, 3)]);
}

#[test]
fn test_emptied_cart_is_empty() {
    let events = vec![
        cart(5, 2, CartAction::Added),
        cart(5, 2, CartAction::Removed),
    ];

    let agg = CartAggregate::from_events(&events);
    assert!(agg.positive_quantities().is_empty());
}

#[test]
fn test_over_removal_stays_hidden() {
    // Removing more than was added drives the sum negative; the cart view
    // must not surface the product.
    let events = vec![
        cart(9, 1, CartAction::Added),
        cart(9, 5, CartAction::Removed),
    ];

    let agg = CartAggregate::from_events(&events);
    assert_eq!(agg.quantity(9), Some(-4));
    assert!(agg.positive_quantities().is_empty());
}

#[test]
fn test_replay_is_deterministic() {
    let events = vec![
        cart(1, 2, CartAction::Added),
        cart(2, 1, CartAction::Added),
        cart(1, 1, CartAction::Decreased),
        InteractionEvent::Impression { product_id: 3 },
        cart(3, 4, CartAction::Added),
    ];

    let first = CartAggregate::from_events(&events);
    let second = CartAggregate::from_events(&events);

    assert_eq!(first.positive_quantities(), second.positive_quantities());
    assert_eq!(first.positive_quantities(), vec![(1, 1), (2, 1), (3, 4)]);
}

#[test]
fn test_non_cart_events_do_not_change_quantities() {
    let mut agg = CartAggregate::default();
    agg.apply(&InteractionEvent::page_hit("products"));
    agg.apply(&InteractionEvent::ProductClick { product_id: 1 });
    agg.apply(&InteractionEvent::Impression { product_id: 1 });

    assert!(agg.is_empty());
}

#[test]
fn test_counts_match_session() {
    let events = vec![
        InteractionEvent::page_hit("products"),
        InteractionEvent::Impression { product_id: 1 },
        InteractionEvent::Impression { product_id: 2 },
        InteractionEvent::ProductClick { product_id: 1 },
        cart(1, 1, CartAction::Added),
        InteractionEvent::page_hit("cart"),
    ];

    let mut counts = InteractionCounts::default();
    for event in &events {
        counts.record(event);
    }

    assert_eq!(counts.page_hits, 2);
    assert_eq!(counts.impressions, 2);
    assert_eq!(counts.clicks, 1);
    assert_eq!(counts.cart_events, 1);
}
