//! HTTP API layer for the MyKart storefront.
//!
//! REST endpoints via Axum:
//! - Catalog: `GET /api/products`, `GET /api/products/:id`, `POST /api/products`
//! - Tracking: `POST /api/impressions`
//! - Cart: `POST /api/cart/add`, `POST /api/cart/remove`, `GET /api/cart`
//! - Orders: `POST /api/orders`
//! - Analytics: `GET /api/analytics/summary`
//! - Operational: `/health`, `/health/ready`, `/metrics`
//!
//! Storefront endpoints keep the wire shapes the web frontend expects
//! (camelCase keys, bare top-level objects). Errors are rendered through
//! [`crate::error::ErrorResponse`].

mod handlers;

use axum::{
    error_handling::HandleErrorLayer,
    extract::{MatchedPath, Request},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower::{timeout::TimeoutLayer, BoxError, ServiceBuilder};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::db::health::DatabaseHealthMonitor;
use crate::db::Database;
use crate::error::{ErrorCode, StoreError};
use crate::tracking::InteractionSink;

/// Upper bound on request handling time before the server gives up.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub sink: Arc<dyn InteractionSink>,
    pub db_health: DatabaseHealthMonitor,
}

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Operational endpoints
        .route("/health", get(handlers::health_check))
        .route("/health/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::prometheus_metrics))
        // Catalog
        .route(
            "/api/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route("/api/products/:id", get(handlers::get_product))
        // Tracking
        .route("/api/impressions", post(handlers::record_impression))
        // Cart
        .route("/api/cart/add", post(handlers::add_to_cart))
        .route("/api/cart/remove", post(handlers::remove_from_cart))
        .route("/api/cart", get(handlers::get_cart))
        // Orders
        .route("/api/orders", post(handlers::place_order))
        // Analytics
        .route("/api/analytics/summary", get(handlers::analytics_summary))
        // Middleware
        .layer(middleware::from_fn(track_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
        )
        .with_state(state)
}

/// Convert middleware-stack errors into the standard error envelope.
///
/// The timeout layer is the only fallible layer in the stack; anything else
/// surfacing here is unexpected.
async fn handle_middleware_error(err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        StoreError::new(ErrorCode::RequestTimeout, "Request timed out").into_response()
    } else {
        StoreError::internal(err.to_string()).into_response()
    }
}

/// Record request count and duration per matched route.
async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned());

    let response = next.run(req).await;

    if let Some(route) = route {
        crate::observability::metrics::record_http_request(
            &route,
            response.status().as_u16(),
            start.elapsed().as_secs_f64(),
        );
    }

    response
}

/// API response wrapper for non-storefront endpoints.
#[derive(Debug, PartialEq, serde::Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: serde::Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_success() {
        let response = ApiResponse::success("test data");
        assert!(response.success);
        assert_eq!(response.data, Some("test data"));
        assert!(response.error.is_none());
    }

    #[test]
    fn test_api_response_error() {
        let response: ApiResponse<()> = ApiResponse::error("test error");
        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error, Some("test error".to_string()));
    }

    #[tokio::test]
    async fn test_timed_out_request_renders_408() {
        use tower::{service_fn, timeout::Timeout, Service, ServiceExt};

        let slow = service_fn(|_: ()| async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            Ok::<_, BoxError>(())
        });
        let mut timed = Timeout::new(slow, Duration::from_millis(5));
        let err = timed.ready().await.unwrap().call(()).await.unwrap_err();

        let response = handle_middleware_error(err).await;
        assert_eq!(response.status(), axum::http::StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn test_unexpected_middleware_error_renders_500() {
        let err: BoxError = "broken layer".into();
        let response = handle_middleware_error(err).await;
        assert_eq!(
            response.status(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
