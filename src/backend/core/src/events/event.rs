//! Domain events for user-interaction tracking.
//!
//! Events are immutable facts named in past-tense form. They are either
//! inserted into relational tables (one table per kind) or published onto a
//! Redis stream, depending on the configured sink.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Cart Actions
// =============================================================================

/// What a cart event did to a product's quantity.
///
/// The signed-sum rule: `Added` and `Increased` contribute positively,
/// `Removed` and `Decreased` negatively. Current cart contents are the
/// per-product sum over the whole event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartAction {
    Added,
    Increased,
    Removed,
    Decreased,
}

impl CartAction {
    /// Stable string form, matching the `cart_events.event_type` column.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Increased => "increased",
            Self::Removed => "removed",
            Self::Decreased => "decreased",
        }
    }

    /// The signed contribution of this action for a given quantity.
    pub const fn signed_delta(&self, quantity: i64) -> i64 {
        match self {
            Self::Added | Self::Increased => quantity,
            Self::Removed | Self::Decreased => -quantity,
        }
    }
}

impl fmt::Display for CartAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CartAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "added" => Ok(Self::Added),
            "increased" => Ok(Self::Increased),
            "removed" => Ok(Self::Removed),
            "decreased" => Ok(Self::Decreased),
            other => Err(format!("unknown cart action: {}", other)),
        }
    }
}

// =============================================================================
// Interaction Events
// =============================================================================

/// A user-interaction event.
///
/// Serialized with an `event_type` tag so stream consumers can dispatch
/// without knowing every variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum InteractionEvent {
    /// A storefront page was requested.
    PageHit { page: String },

    /// A product detail view was opened.
    ProductClick { product_id: i64 },

    /// A product card was shown to the user.
    Impression { product_id: i64 },

    /// A product's cart quantity changed.
    Cart {
        product_id: i64,
        quantity: i64,
        action: CartAction,
    },
}

impl InteractionEvent {
    /// Get the event type name.
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::PageHit { .. } => "page_hit",
            Self::ProductClick { .. } => "product_click",
            Self::Impression { .. } => "impression",
            Self::Cart { .. } => "cart",
        }
    }

    /// Convenience constructor for a page hit.
    pub fn page_hit(page: impl Into<String>) -> Self {
        Self::PageHit { page: page.into() }
    }

    /// Convenience constructor for a cart event.
    pub fn cart(product_id: i64, quantity: i64, action: CartAction) -> Self {
        Self::Cart {
            product_id,
            quantity,
            action,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_delta() {
        assert_eq!(CartAction::Added.signed_delta(3), 3);
        assert_eq!(CartAction::Increased.signed_delta(2), 2);
        assert_eq!(CartAction::Removed.signed_delta(3), -3);
        assert_eq!(CartAction::Decreased.signed_delta(1), -1);
    }

    #[test]
    fn test_cart_action_round_trip() {
        for action in [
            CartAction::Added,
            CartAction::Increased,
            CartAction::Removed,
            CartAction::Decreased,
        ] {
            assert_eq!(action.as_str().parse::<CartAction>().unwrap(), action);
        }
        assert!("deleted".parse::<CartAction>().is_err());
    }

    #[test]
    fn test_event_serialization_is_tagged() {
        let event = InteractionEvent::cart(7, 2, CartAction::Added);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["event_type"], "cart");
        assert_eq!(json["product_id"], 7);
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["action"], "added");

        let back: InteractionEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_page_hit_event_type() {
        let event = InteractionEvent::page_hit("products");
        assert_eq!(event.event_type(), "page_hit");
    }
}
