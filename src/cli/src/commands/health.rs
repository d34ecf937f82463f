//! Health check commands.

use anyhow::Result;
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct HealthArgs {
    /// Query the readiness endpoint (database and sink details) instead of
    /// the basic liveness check
    #[arg(short, long)]
    ready: bool,
}

// ── API types ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    timestamp: String,
}

#[derive(Debug, Deserialize, Serialize)]
struct ReadinessResponse {
    status: String,
    database: DatabaseStatus,
    sink: String,
}

#[derive(Debug, Deserialize, Serialize)]
struct DatabaseStatus {
    latency_ms: u64,
    pool: PoolStatus,
}

#[derive(Debug, Deserialize, Serialize)]
struct PoolStatus {
    pool_size: u32,
    idle_connections: u32,
    active_connections: u32,
    max_connections: u32,
    min_connections: u32,
    utilization_pct: f64,
}

// ── Execution ───────────────────────────────────────────────────────────────

pub async fn execute(args: HealthArgs, client: &ApiClient, format: OutputFormat) -> Result<()> {
    if args.ready {
        let resp: ReadinessResponse = client.get("/health/ready").await?;

        if format.is_table() {
            output::print_header("Readiness");
            output::print_detail("Status", &resp.status);
            output::print_detail("Sink", &resp.sink);
            output::print_detail("DB latency", &format!("{} ms", resp.database.latency_ms));
            output::print_detail(
                "Pool",
                &format!(
                    "{} active / {} idle / {} max ({:.0}% utilized)",
                    resp.database.pool.active_connections,
                    resp.database.pool.idle_connections,
                    resp.database.pool.max_connections,
                    resp.database.pool.utilization_pct
                ),
            );
        } else {
            output::print_item(&resp, format);
        }
    } else {
        let resp: HealthResponse = client.get("/health").await?;

        if format.is_table() {
            output::print_success(&format!(
                "Server is {} (version {})",
                resp.status, resp.version
            ));
        } else {
            output::print_item(&resp, format);
        }
    }

    Ok(())
}
