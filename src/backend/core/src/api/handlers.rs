//! API request handlers with proper error propagation.
//!
//! All handlers return `Result<impl IntoResponse, StoreError>` so that errors
//! are automatically converted to appropriate HTTP status codes via the
//! `IntoResponse` implementation on `StoreError`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use super::{ApiResponse, AppState};
use crate::catalog::NewProduct;
use crate::db::OrderItem;
use crate::error::StoreError;
use crate::events::{CartAction, InteractionEvent};
use crate::observability::metrics;
use crate::pagination::{OffsetPagination, PageInfo};

// ═══════════════════════════════════════════════════════════════════════════════
// Catalog Handlers
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<impl IntoResponse, StoreError> {
    state
        .sink
        .publish(InteractionEvent::page_hit("products"))
        .await?;

    let pagination = OffsetPagination::from_params(query.page, query.limit);
    let total = state.db.get_product_count().await? as u64;
    let products = state
        .db
        .get_products_paginated(pagination.limit() as i64, pagination.offset() as i64)
        .await?;

    Ok(Json(serde_json::json!({
        "products": products,
        "pagination": PageInfo::new(pagination.page, pagination.limit, total),
    })))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, StoreError> {
    state
        .sink
        .publish(InteractionEvent::ProductClick { product_id: id })
        .await?;

    let product = state
        .db
        .get_product(id)
        .await?
        .ok_or_else(|| StoreError::product_not_found(id))?;

    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(req): Json<NewProduct>,
) -> Result<impl IntoResponse, StoreError> {
    req.validate()?;
    let product = state.db.insert_product(&req).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(product))))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tracking Handlers
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpressionRequest {
    pub product_id: i64,
}

pub async fn record_impression(
    State(state): State<AppState>,
    Json(req): Json<ImpressionRequest>,
) -> Result<impl IntoResponse, StoreError> {
    state
        .sink
        .publish(InteractionEvent::Impression {
            product_id: req.product_id,
        })
        .await?;

    Ok(Json(serde_json::json!({ "success": true })))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Cart Handlers
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMutationRequest {
    pub product_id: i64,
    pub quantity: Option<i64>,
}

impl CartMutationRequest {
    fn quantity(&self) -> Result<i64, StoreError> {
        let quantity = self.quantity.unwrap_or(1);
        if quantity < 1 {
            return Err(StoreError::validation("Quantity must be at least 1"));
        }
        Ok(quantity)
    }
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    Json(req): Json<CartMutationRequest>,
) -> Result<impl IntoResponse, StoreError> {
    let quantity = req.quantity()?;
    state
        .sink
        .publish(InteractionEvent::cart(
            req.product_id,
            quantity,
            CartAction::Added,
        ))
        .await?;

    Ok(Json(serde_json::json!({ "success": true })))
}

pub async fn remove_from_cart(
    State(state): State<AppState>,
    Json(req): Json<CartMutationRequest>,
) -> Result<impl IntoResponse, StoreError> {
    let quantity = req.quantity()?;
    state
        .sink
        .publish(InteractionEvent::cart(
            req.product_id,
            quantity,
            CartAction::Removed,
        ))
        .await?;

    Ok(Json(serde_json::json!({ "success": true })))
}

pub async fn get_cart(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, StoreError> {
    state
        .sink
        .publish(InteractionEvent::page_hit("cart"))
        .await?;

    let cart_items = state.sink.cart_state().await?;

    Ok(Json(serde_json::json!({ "cartItems": cart_items })))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Order Handlers
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub cart_items: Vec<OrderItem>,
}

pub async fn place_order(
    State(state): State<AppState>,
    Json(req): Json<OrderRequest>,
) -> Result<impl IntoResponse, StoreError> {
    if req.cart_items.is_empty() {
        return Err(StoreError::empty_cart());
    }

    let placed = state.db.place_order(&req.cart_items).await?;
    metrics::record_order_placed(placed.total);

    tracing::info!(
        order_id = placed.order_id,
        total = placed.total,
        items = req.cart_items.len(),
        "Order placed"
    );

    Ok(Json(serde_json::json!({
        "success": true,
        "orderId": placed.order_id,
        "message": "Order placed successfully!",
        "total": format!("{:.2}", placed.total),
    })))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Analytics Handlers
// ═══════════════════════════════════════════════════════════════════════════════

pub async fn analytics_summary(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, StoreError> {
    let total_products = state.db.get_product_count().await?;
    let total_orders = state.db.get_order_count().await?;
    let counts = state.sink.interaction_counts().await?;

    Ok(Json(serde_json::json!({
        "totalProducts": total_products,
        "totalOrders": total_orders,
        "totalClicks": counts.clicks,
        "totalImpressions": counts.impressions,
    })))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Health and Metrics
// ═══════════════════════════════════════════════════════════════════════════════

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, StoreError> {
    let latency = state.db_health.check_connectivity().await?;
    let pool = state.db_health.pool_metrics();
    metrics::set_db_pool_connections(pool.active_connections, pool.idle_connections);

    Ok(Json(serde_json::json!({
        "status": "ready",
        "database": {
            "latency_ms": latency.as_millis() as u64,
            "pool": pool,
        },
        "sink": state.sink.name(),
    })))
}

pub async fn prometheus_metrics() -> impl IntoResponse {
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics::render(),
    )
}
