//! Analytics summary command.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::output::{self, OutputFormat};

// ── API types ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyticsSummary {
    total_products: u64,
    total_orders: u64,
    total_clicks: u64,
    total_impressions: u64,
}

// ── Execution ───────────────────────────────────────────────────────────────

pub async fn execute(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let summary: AnalyticsSummary = client.get("/api/analytics/summary").await?;

    if format.is_table() {
        output::print_header("Store Analytics");
        output::print_detail("Products", &summary.total_products.to_string());
        output::print_detail("Orders", &summary.total_orders.to_string());
        output::print_detail("Clicks", &summary.total_clicks.to_string());
        output::print_detail("Impressions", &summary.total_impressions.to_string());
    } else {
        output::print_item(&summary, format);
    }

    Ok(())
}
