//! Order commands.

use anyhow::{bail, Result};
use clap::Subcommand;
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::commands::cart::{self, CartLine};
use crate::output::{self, OutputFormat};

#[derive(Subcommand)]
pub enum OrderCommands {
    /// Place an order from the current cart contents
    Place,
}

// ── API types ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlaceOrderRequest {
    cart_items: Vec<CartLine>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlaceOrderResponse {
    success: bool,
    order_id: i64,
    message: String,
    total: String,
}

// ── Execution ───────────────────────────────────────────────────────────────

pub async fn execute(cmd: OrderCommands, client: &ApiClient, format: OutputFormat) -> Result<()> {
    match cmd {
        OrderCommands::Place => {
            let cart_items = cart::fetch_cart(client).await?;
            if cart_items.is_empty() {
                bail!("cart is empty, nothing to order");
            }

            let resp: PlaceOrderResponse =
                client.post("/api/orders", &PlaceOrderRequest { cart_items }).await?;

            if format.is_table() {
                output::print_success(&resp.message);
                output::print_detail("Order ID", &resp.order_id.to_string());
                output::print_detail("Total", &format!("${}", resp.total));
            } else {
                output::print_item(&resp, format);
            }
        }
    }

    Ok(())
}
