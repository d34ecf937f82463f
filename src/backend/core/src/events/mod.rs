//! Interaction Events
//!
//! This module provides the append-only interaction-event model for MyKart:
//!
//! - **`event`**: The `InteractionEvent` domain events (page hits, clicks,
//!   impressions, cart events) and the signed-sum `CartAction` rule.
//! - **`aggregate`**: The `Aggregate` trait for state reconstruction, with the
//!   `CartAggregate` that folds cart events into current cart contents.

pub mod aggregate;
pub mod event;

pub use aggregate::*;
pub use event::*;
