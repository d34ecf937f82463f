//! Cart commands.
//!
//! Provides add, remove, and show operations for the cart. The cart is
//! derived server-side from the interaction event log, so show always
//! reflects the full event history.

use anyhow::Result;
use clap::Subcommand;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::client::ApiClient;
use crate::output::{self, OutputFormat};

#[derive(Subcommand)]
pub enum CartCommands {
    /// Add a product to the cart
    Add {
        /// Product ID
        product_id: i64,

        /// Quantity to add
        #[arg(short, long, default_value = "1")]
        quantity: i64,
    },

    /// Remove a product from the cart
    Remove {
        /// Product ID
        product_id: i64,

        /// Quantity to remove
        #[arg(short, long, default_value = "1")]
        quantity: i64,
    },

    /// Show current cart contents
    Show,
}

// ── API types ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartMutationRequest {
    product_id: i64,
    quantity: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub cart_items: Vec<CartLine>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CartLine {
    pub product_id: i64,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    pub quantity: i64,
}

#[derive(Debug, Deserialize, Serialize, Tabled)]
struct CartRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Qty")]
    quantity: i64,
    #[tabled(rename = "Price ($)")]
    price: String,
    #[tabled(rename = "Subtotal ($)")]
    subtotal: String,
}

// ── Execution ───────────────────────────────────────────────────────────────

pub async fn execute(cmd: CartCommands, client: &ApiClient, format: OutputFormat) -> Result<()> {
    match cmd {
        CartCommands::Add {
            product_id,
            quantity,
        } => {
            let body = CartMutationRequest {
                product_id,
                quantity,
            };
            let _: serde_json::Value = client.post("/api/cart/add", &body).await?;
            output::print_success(&format!(
                "Added {} x product {} to cart",
                quantity, product_id
            ));
        }

        CartCommands::Remove {
            product_id,
            quantity,
        } => {
            let body = CartMutationRequest {
                product_id,
                quantity,
            };
            let _: serde_json::Value = client.post("/api/cart/remove", &body).await?;
            output::print_success(&format!(
                "Removed {} x product {} from cart",
                quantity, product_id
            ));
        }

        CartCommands::Show => {
            let resp: CartResponse = client.get("/api/cart").await?;

            let total: f64 = resp
                .cart_items
                .iter()
                .map(|line| line.price * line.quantity as f64)
                .sum();

            let rows: Vec<CartRow> = resp
                .cart_items
                .into_iter()
                .map(|line| CartRow {
                    id: line.product_id,
                    name: line.name,
                    quantity: line.quantity,
                    price: format!("{:.2}", line.price),
                    subtotal: format!("{:.2}", line.price * line.quantity as f64),
                })
                .collect();

            output::print_list(&rows, format);

            if format.is_table() && !rows.is_empty() {
                output::print_info(&format!("Cart total: {}", output::price(total)));
            }
        }
    }

    Ok(())
}

/// Fetch the current cart lines (used by order placement).
pub async fn fetch_cart(client: &ApiClient) -> Result<Vec<CartLine>> {
    let resp: CartResponse = client.get("/api/cart").await?;
    Ok(resp.cart_items)
}
