//! Wire format tests for interaction events.
//!
//! Stream consumers dispatch on the `event_type` tag, so the serialized
//! shape is a compatibility contract.

use mykart_core::events::{CartAction, InteractionEvent};
use serde_json::json;

#[test]
fn test_page_hit_format() {
    let event = InteractionEvent::page_hit("products");
    let value = serde_json::to_value(&event).unwrap();

    assert_eq!(value, json!({"event_type": "page_hit", "page": "products"}));
}

#[test]
fn test_product_click_format() {
    let event = InteractionEvent::ProductClick { product_id: 12 };
    let value = serde_json::to_value(&event).unwrap();

    assert_eq!(
        value,
        json!({"event_type": "product_click", "product_id": 12})
    );
}

#[test]
fn test_cart_event_format() {
    let event = InteractionEvent::cart(4, 2, CartAction::Decreased);
    let value = serde_json::to_value(&event).unwrap();

    assert_eq!(
        value,
        json!({
            "event_type": "cart",
            "product_id": 4,
            "quantity": 2,
            "action": "decreased",
        })
    );
}

#[test]
fn test_event_round_trip() {
    let events = vec![
        InteractionEvent::page_hit("cart"),
        InteractionEvent::Impression { product_id: 3 },
        InteractionEvent::cart(1, 5, CartAction::Added),
    ];

    for event in events {
        let payload = serde_json::to_string(&event).unwrap();
        let decoded: InteractionEvent = serde_json::from_str(&payload).unwrap();
        assert_eq!(decoded, event);
    }
}

#[test]
fn test_cart_action_column_values() {
    // Must match the CHECK constraint on cart_events.event_type.
    assert_eq!(CartAction::Added.as_str(), "added");
    assert_eq!(CartAction::Increased.as_str(), "increased");
    assert_eq!(CartAction::Removed.as_str(), "removed");
    assert_eq!(CartAction::Decreased.as_str(), "decreased");

    for action in [
        CartAction::Added,
        CartAction::Increased,
        CartAction::Removed,
        CartAction::Decreased,
    ] {
        assert_eq!(action.as_str().parse::<CartAction>().unwrap(), action);
    }
}

#[test]
fn test_unknown_event_type_rejected() {
    let err = serde_json::from_value::<InteractionEvent>(
        json!({"event_type": "hover", "product_id": 1}),
    );
    assert!(err.is_err());
}
