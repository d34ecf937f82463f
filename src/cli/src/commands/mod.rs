//! CLI command implementations.

pub mod analytics;
pub mod cart;
pub mod config;
pub mod health;
pub mod order;
pub mod product;
