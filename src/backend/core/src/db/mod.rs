//! Database layer for MyKart.
//!
//! Uses PostgreSQL for persistent storage with sqlx.

pub mod health;

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::catalog::{NewProduct, Product};
use crate::error::Result;
use crate::events::{CartAction, CartLine};
use crate::tracking::InteractionCounts;

/// Database connection and operations.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    pub async fn new(database_url: &str, max_connections: u32, min_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(std::time::Duration::from_secs(5))
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| crate::error::StoreError::from(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Product Operations
    // ═══════════════════════════════════════════════════════════════════════════

    /// Insert a new product and return the stored row.
    pub async fn insert_product(&self, product: &NewProduct) -> Result<Product> {
        let row = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, category, brand, description, price, stock_quantity, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING product_id, name, category, brand, description, price, stock_quantity,
                      image_url, created_at
            "#,
        )
        .bind(&product.name)
        .bind(&product.category)
        .bind(&product.brand)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock_quantity)
        .bind(&product.image_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Get product by ID.
    pub async fn get_product(&self, product_id: i64) -> Result<Option<Product>> {
        let row = sqlx::query_as::<_, Product>(
            r#"
            SELECT product_id, name, category, brand, description, price, stock_quantity,
                   image_url, created_at
            FROM products
            WHERE product_id = $1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Get paginated products ordered by product_id.
    pub async fn get_products_paginated(&self, limit: i64, offset: i64) -> Result<Vec<Product>> {
        let rows = sqlx::query_as::<_, Product>(
            r#"
            SELECT product_id, name, category, brand, description, price, stock_quantity,
                   image_url, created_at
            FROM products
            ORDER BY product_id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Get total product count.
    pub async fn get_product_count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Get products for a set of IDs, ordered by product_id.
    ///
    /// Used to join product details onto stream-reconstructed cart contents.
    pub async fn get_products_by_ids(&self, product_ids: &[i64]) -> Result<Vec<Product>> {
        if product_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, Product>(
            r#"
            SELECT product_id, name, category, brand, description, price, stock_quantity,
                   image_url, created_at
            FROM products
            WHERE product_id = ANY($1)
            ORDER BY product_id
            "#,
        )
        .bind(product_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Interaction Event Operations (relational sink)
    // ═══════════════════════════════════════════════════════════════════════════

    /// Record a page hit.
    pub async fn insert_page_hit(&self, page: &str) -> Result<()> {
        sqlx::query("INSERT INTO page_hits (page_name) VALUES ($1)")
            .bind(page)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Record a product click.
    pub async fn insert_click(&self, product_id: i64) -> Result<()> {
        sqlx::query("INSERT INTO clicks (product_id) VALUES ($1)")
            .bind(product_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Record a product impression.
    pub async fn insert_impression(&self, product_id: i64) -> Result<()> {
        sqlx::query("INSERT INTO impressions (product_id) VALUES ($1)")
            .bind(product_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Append a cart event to the log.
    pub async fn insert_cart_event(
        &self,
        product_id: i64,
        quantity: i64,
        action: CartAction,
    ) -> Result<()> {
        sqlx::query("INSERT INTO cart_events (product_id, quantity, event_type) VALUES ($1, $2, $3)")
            .bind(product_id)
            .bind(quantity)
            .bind(action.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Cart Reconstruction
    // ═══════════════════════════════════════════════════════════════════════════

    /// Derive current cart contents from the append-only cart-event log.
    ///
    /// Signed-sum aggregation: `added`/`increased` count positively,
    /// `removed`/`decreased` negatively. The HAVING clause keeps rows with
    /// non-positive totals out of the result. Cart state is global: there is
    /// no per-user partitioning in the event log.
    pub async fn cart_contents(&self) -> Result<Vec<CartLine>> {
        let rows = sqlx::query_as::<_, CartLine>(
            r#"
            SELECT
                p.product_id,
                p.name,
                p.price,
                p.image_url,
                SUM(CASE
                    WHEN ce.event_type IN ('added', 'increased') THEN ce.quantity
                    WHEN ce.event_type IN ('removed', 'decreased') THEN -ce.quantity
                    ELSE 0
                END)::BIGINT AS quantity
            FROM cart_events ce
            JOIN products p ON ce.product_id = p.product_id
            GROUP BY p.product_id, p.name, p.price, p.image_url
            HAVING SUM(CASE
                WHEN ce.event_type IN ('added', 'increased') THEN ce.quantity
                WHEN ce.event_type IN ('removed', 'decreased') THEN -ce.quantity
                ELSE 0
            END) > 0
            ORDER BY p.product_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Order Operations
    // ═══════════════════════════════════════════════════════════════════════════

    /// Place an order for the given line items.
    ///
    /// The order row and all its line items commit in a single transaction.
    /// Returns the new order id and the computed total.
    pub async fn place_order(&self, items: &[OrderItem]) -> Result<PlacedOrder> {
        let total: f64 = items
            .iter()
            .map(|item| item.price * item.quantity as f64)
            .sum();

        let mut tx = self.pool.begin().await?;

        let order_id: i64 = sqlx::query_scalar(
            "INSERT INTO orders (total_amount, status) VALUES ($1, $2) RETURNING order_id",
        )
        .bind(total)
        .bind("placed")
        .fetch_one(&mut *tx)
        .await?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO order_line_items (order_id, product_id, quantity, price)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(order_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(PlacedOrder { order_id, total })
    }

    /// Get total order count.
    pub async fn get_order_count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Analytics
    // ═══════════════════════════════════════════════════════════════════════════

    /// Count rows in the relational interaction tables.
    pub async fn relational_interaction_counts(&self) -> Result<InteractionCounts> {
        let page_hits = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM page_hits")
            .fetch_one(&self.pool);
        let clicks =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clicks").fetch_one(&self.pool);
        let impressions = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM impressions")
            .fetch_one(&self.pool);
        let cart_events = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cart_events")
            .fetch_one(&self.pool);

        let (page_hits, clicks, impressions, cart_events) =
            futures::try_join!(page_hits, clicks, impressions, cart_events)?;

        Ok(InteractionCounts {
            page_hits: page_hits as u64,
            clicks: clicks as u64,
            impressions: impressions as u64,
            cart_events: cart_events as u64,
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Row / Input Types
// ═══════════════════════════════════════════════════════════════════════════════

/// A line item in an order placement request.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct OrderItem {
    pub product_id: i64,
    pub quantity: i64,
    pub price: f64,
}

/// The outcome of a successful order placement.
#[derive(Debug, Clone, Copy)]
pub struct PlacedOrder {
    pub order_id: i64,
    pub total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_total_is_sum_of_line_totals() {
        let items = vec![
            OrderItem {
                product_id: 1,
                quantity: 2,
                price: 9.99,
            },
            OrderItem {
                product_id: 2,
                quantity: 1,
                price: 24.50,
            },
        ];

        let total: f64 = items
            .iter()
            .map(|item| item.price * item.quantity as f64)
            .sum();

        assert!((total - 44.48).abs() < 1e-9);
    }

    #[test]
    fn test_order_item_deserializes_from_cart_line_shape() {
        // Order requests carry rows as returned by the cart endpoint, which
        // include extra display fields that must be ignored.
        let json = serde_json::json!({
            "product_id": 3,
            "name": "Desk Lamp",
            "price": 19.99,
            "image_url": null,
            "quantity": 2
        });

        let item: OrderItem = serde_json::from_value(json).unwrap();
        assert_eq!(item.product_id, 3);
        assert_eq!(item.quantity, 2);
    }
}
