//! Product catalog models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// A catalog product as stored in the `products` table.
///
/// Field names match the relational columns so the row serializes to the
/// wire shape the storefront client expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub product_id: i64,
    pub name: String,
    pub category: String,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub price: f64,
    pub stock_quantity: i32,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for inserting a new catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub stock_quantity: i32,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl NewProduct {
    /// Validate the payload before insertion.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(StoreError::validation("Product name cannot be empty"));
        }
        if self.category.trim().is_empty() {
            return Err(StoreError::validation("Product category cannot be empty"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(StoreError::validation("Product price must be non-negative"));
        }
        if self.stock_quantity < 0 {
            return Err(StoreError::validation(
                "Product stock quantity must be non-negative",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewProduct {
        NewProduct {
            name: "Wireless Mouse".to_string(),
            category: "Electronics".to_string(),
            brand: Some("Logi".to_string()),
            description: None,
            price: 24.99,
            stock_quantity: 120,
            image_url: None,
        }
    }

    #[test]
    fn test_valid_product_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut p = sample();
        p.name = "   ".to_string();
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut p = sample();
        p.price = -1.0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_nan_price_rejected() {
        let mut p = sample();
        p.price = f64::NAN;
        assert!(p.validate().is_err());
    }
}
