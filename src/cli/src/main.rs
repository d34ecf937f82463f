//! MyKart CLI - Command-line interface for the MyKart storefront backend.
//!
//! Provides commands for browsing the catalog, driving the cart, placing
//! orders, and inspecting analytics and system health.

mod client;
mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{analytics, cart, config, health, order, product};
use output::OutputFormat;

/// MyKart - storefront backend CLI
#[derive(Parser)]
#[command(
    name = "mykart",
    version = "0.1.0",
    about = "MyKart - storefront backend CLI",
    long_about = "CLI tool for browsing the MyKart catalog, managing the cart, placing orders, and inspecting analytics.",
    propagate_version = true
)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "table")]
    output: OutputFormat,

    /// API server URL
    #[arg(long, global = true, env = "MYKART_API_URL")]
    api_url: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Product catalog operations
    #[command(subcommand)]
    Product(product::ProductCommands),

    /// Cart operations
    #[command(subcommand)]
    Cart(cart::CartCommands),

    /// Order operations
    #[command(subcommand)]
    Order(order::OrderCommands),

    /// Show the analytics summary
    Analytics,

    /// Check system health
    Health(health::HealthArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(config::ConfigCommands),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let api_url = cli
        .api_url
        .clone()
        .or_else(config::load_api_url)
        .unwrap_or_else(|| "http://localhost:3001".to_string());

    let client = client::ApiClient::new(&api_url)?;
    let format = cli.output;

    let result = match cli.command {
        Commands::Product(cmd) => product::execute(cmd, &client, format).await,
        Commands::Cart(cmd) => cart::execute(cmd, &client, format).await,
        Commands::Order(cmd) => order::execute(cmd, &client, format).await,
        Commands::Analytics => analytics::execute(&client, format).await,
        Commands::Health(args) => health::execute(args, &client, format).await,
        Commands::Config(cmd) => config::execute(cmd, format).await,
    };

    if let Err(e) = result {
        output::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
