//! Product catalog commands.
//!
//! Provides list, show, and create operations for catalog products.

use anyhow::Result;
use clap::Subcommand;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::client::ApiClient;
use crate::output::{self, OutputFormat};

#[derive(Subcommand)]
pub enum ProductCommands {
    /// List catalog products
    List {
        /// Page number (1-indexed)
        #[arg(short, long, default_value = "1")]
        page: u64,

        /// Products per page
        #[arg(short, long, default_value = "20")]
        limit: u64,
    },

    /// Show a single product (records a click)
    Show {
        /// Product ID
        product_id: i64,
    },

    /// Create a new product
    Create {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Product category
        #[arg(short, long)]
        category: String,

        /// Price in dollars
        #[arg(short, long)]
        price: f64,

        /// Brand name
        #[arg(short, long)]
        brand: Option<String>,

        /// Product description
        #[arg(short, long)]
        description: Option<String>,

        /// Initial stock quantity
        #[arg(short, long, default_value = "0")]
        stock: i32,

        /// Image URL
        #[arg(short, long)]
        image_url: Option<String>,
    },
}

// ── API types ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize)]
struct ProductInfo {
    product_id: i64,
    name: String,
    category: String,
    #[serde(default)]
    brand: Option<String>,
    price: f64,
    #[serde(default)]
    stock_quantity: i32,
}

#[derive(Debug, Deserialize)]
struct ProductsPage {
    products: Vec<ProductInfo>,
    pagination: PageInfo,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    page: u64,
    limit: u64,
    total: u64,
    total_pages: u64,
}

#[derive(Serialize)]
struct CreateProductRequest {
    name: String,
    category: String,
    price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    stock_quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreateProductResponse {
    data: ProductInfo,
}

#[derive(Debug, Deserialize, Serialize, Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Brand")]
    brand: String,
    #[tabled(rename = "Price ($)")]
    price: String,
    #[tabled(rename = "Stock")]
    stock: i32,
}

impl From<ProductInfo> for ProductRow {
    fn from(p: ProductInfo) -> Self {
        Self {
            id: p.product_id,
            name: p.name,
            category: p.category,
            brand: p.brand.unwrap_or_default(),
            price: format!("{:.2}", p.price),
            stock: p.stock_quantity,
        }
    }
}

// ── Execution ───────────────────────────────────────────────────────────────

pub async fn execute(cmd: ProductCommands, client: &ApiClient, format: OutputFormat) -> Result<()> {
    match cmd {
        ProductCommands::List { page, limit } => {
            let resp: ProductsPage = client
                .get(&format!("/api/products?page={}&limit={}", page, limit))
                .await?;

            let rows: Vec<ProductRow> = resp.products.into_iter().map(Into::into).collect();
            output::print_list(&rows, format);

            if format.is_table() {
                output::print_info(&format!(
                    "Page {} of {} ({} products total)",
                    resp.pagination.page, resp.pagination.total_pages, resp.pagination.total
                ));
            }
        }

        ProductCommands::Show { product_id } => {
            let product: serde_json::Value =
                client.get(&format!("/api/products/{}", product_id)).await?;

            if format.is_table() {
                output::print_header(&format!("Product {}", product_id));
                for key in ["name", "category", "brand", "description", "image_url"] {
                    if let Some(value) = product.get(key).and_then(|v| v.as_str()) {
                        output::print_detail(key, value);
                    }
                }
                if let Some(price) = product.get("price").and_then(|v| v.as_f64()) {
                    output::print_detail("price", &output::price(price));
                }
                if let Some(stock) = product.get("stock_quantity").and_then(|v| v.as_i64()) {
                    output::print_detail("stock", &stock.to_string());
                }
            } else {
                output::print_item(&product, format);
            }
        }

        ProductCommands::Create {
            name,
            category,
            price,
            brand,
            description,
            stock,
            image_url,
        } => {
            let body = CreateProductRequest {
                name,
                category,
                price,
                brand,
                description,
                stock_quantity: stock,
                image_url,
            };

            let resp: CreateProductResponse = client.post("/api/products", &body).await?;

            if format.is_table() {
                output::print_success("Product created");
                output::print_detail("ID", &resp.data.product_id.to_string());
                output::print_detail("Name", &resp.data.name);
                output::print_detail("Price", &output::price(resp.data.price));
            } else {
                output::print_item(&resp.data, format);
            }
        }
    }

    Ok(())
}
