//! Tests for API response types and error rendering.
//!
//! Tests cover:
//! - ApiResponse success/error shapes
//! - StoreError to HTTP response conversion
//! - Pagination wire format
//! - Order line item deserialization from storefront payloads

use axum::response::IntoResponse;
use mykart_core::api::ApiResponse;
use mykart_core::db::OrderItem;
use mykart_core::error::{ErrorCode, StoreError};
use mykart_core::pagination::{OffsetPagination, PageInfo};
use serde_json::{json, Value};

// ============================================================================
// ApiResponse Tests
// ============================================================================

#[test]
fn test_api_response_success() {
    let response = ApiResponse::success("test data");

    assert!(response.success);
    assert_eq!(response.data, Some("test data"));
    assert!(response.error.is_none());
}

#[test]
fn test_api_response_error() {
    let response = ApiResponse::<()>::error("something went wrong");

    assert!(!response.success);
    assert!(response.data.is_none());
    assert_eq!(response.error, Some("something went wrong".to_string()));
}

#[test]
fn test_api_response_serialization_success() {
    let response = ApiResponse::success(json!({"key": "value"}));
    let json_str = serde_json::to_string(&response).unwrap();
    let parsed: Value = serde_json::from_str(&json_str).unwrap();

    assert_eq!(parsed["success"], true);
    assert_eq!(parsed["data"]["key"], "value");
    assert!(parsed["error"].is_null());
}

#[test]
fn test_api_response_serialization_error() {
    let response = ApiResponse::<Value>::error("test error");
    let json_str = serde_json::to_string(&response).unwrap();
    let parsed: Value = serde_json::from_str(&json_str).unwrap();

    assert_eq!(parsed["success"], false);
    assert!(parsed["data"].is_null());
    assert_eq!(parsed["error"], "test error");
}

// ============================================================================
// Error Rendering Tests
// ============================================================================

#[tokio::test]
async fn test_product_not_found_renders_404_envelope() {
    let err = StoreError::product_not_found(42);
    let response = err.into_response();

    assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "PRODUCT_NOT_FOUND");
    assert_eq!(body["error"]["numeric_code"], 1000);
}

#[tokio::test]
async fn test_empty_cart_renders_400() {
    let response = StoreError::empty_cart().into_response();
    assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_validation_error_renders_422() {
    let response = StoreError::validation("Quantity must be at least 1").into_response();
    assert_eq!(
        response.status(),
        axum::http::StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[test]
fn test_connection_errors_are_retryable() {
    let err = StoreError::new(ErrorCode::StreamConnectionFailed, "Redis unreachable");
    assert!(err.is_retryable());
    assert_eq!(
        err.http_status(),
        axum::http::StatusCode::SERVICE_UNAVAILABLE
    );
}

// ============================================================================
// Wire Format Tests
// ============================================================================

#[test]
fn test_pagination_wire_format() {
    let info = PageInfo::new(3, 20, 45);
    let parsed = serde_json::to_value(&info).unwrap();

    assert_eq!(
        parsed,
        json!({"page": 3, "limit": 20, "total": 45, "totalPages": 3})
    );
}

#[test]
fn test_out_of_range_page_reports_requested_page() {
    // A listing request far past the end yields an empty window; the
    // pagination object must echo the requested page, not the last one.
    let pagination = OffsetPagination::from_params(Some(100), Some(20));
    assert_eq!(pagination.offset(), 1980);

    let info = PageInfo::new(pagination.page, pagination.limit, 45);
    let parsed = serde_json::to_value(&info).unwrap();

    assert_eq!(
        parsed,
        json!({"page": 100, "limit": 20, "total": 45, "totalPages": 3})
    );
}

#[test]
fn test_order_item_deserializes_from_cart_line() {
    // The storefront posts back the cart lines it received from GET /api/cart.
    let item: OrderItem = serde_json::from_value(json!({
        "product_id": 7,
        "name": "Wireless Mouse",
        "price": 24.99,
        "image_url": null,
        "quantity": 2,
    }))
    .unwrap();

    assert_eq!(item.product_id, 7);
    assert_eq!(item.quantity, 2);
    assert!((item.price - 24.99).abs() < f64::EPSILON);
}

#[test]
fn test_new_product_validation_accepts_generated_inputs() {
    use fake::faker::lorem::en::Word;
    use fake::Fake;
    use mykart_core::catalog::NewProduct;

    for _ in 0..50 {
        let product = NewProduct {
            name: Word().fake(),
            category: Word().fake(),
            brand: None,
            description: None,
            price: (0.01..9999.99).fake(),
            stock_quantity: (0..1000).fake(),
            image_url: None,
        };
        assert!(product.validate().is_ok());
    }
}

#[test]
fn test_order_request_shape() {
    let body = json!({"cartItems": [
        {"product_id": 1, "price": 10.0, "quantity": 3},
        {"product_id": 2, "price": 5.5, "quantity": 1},
    ]});

    let items: Vec<OrderItem> = serde_json::from_value(body["cartItems"].clone()).unwrap();
    let total: f64 = items.iter().map(|i| i.price * i.quantity as f64).sum();

    assert_eq!(items.len(), 2);
    assert_eq!(format!("{:.2}", total), "35.50");
}
