//! Observability: tracing, metrics, and logging.

use opentelemetry_otlp::WithExportConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Initialize the observability stack.
///
/// Log filtering comes from `RUST_LOG` when set, with the configured level as
/// the fallback. When an OTLP endpoint is configured, spans are exported via
/// OpenTelemetry in addition to local logging.
pub fn init(service_name: &str, config: &ObservabilityConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    let telemetry_layer = match &config.otlp_endpoint {
        Some(endpoint) => {
            let tracer = opentelemetry_otlp::new_pipeline()
                .tracing()
                .with_exporter(
                    opentelemetry_otlp::new_exporter()
                        .tonic()
                        .with_endpoint(endpoint),
                )
                .with_trace_config(opentelemetry_sdk::trace::config().with_resource(
                    opentelemetry_sdk::Resource::new(vec![opentelemetry::KeyValue::new(
                        "service.name",
                        service_name.to_string(),
                    )]),
                ))
                .install_batch(opentelemetry_sdk::runtime::Tokio)?;

            Some(tracing_opentelemetry::layer().with_tracer(tracer))
        }
        None => None,
    };

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(telemetry_layer);

    if config.json_logging {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    Ok(())
}

/// Shutdown OpenTelemetry, flushing any pending spans.
pub fn shutdown() {
    opentelemetry::global::shutdown_tracer_provider();
}

/// Metrics registry and helpers.
pub mod metrics {
    use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
    use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
    use std::sync::OnceLock;

    static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    /// Install the Prometheus recorder and keep the render handle.
    ///
    /// Must be called once at startup, before any metrics are recorded.
    pub fn install_prometheus() -> anyhow::Result<()> {
        let handle = PrometheusBuilder::new().install_recorder()?;
        PROMETHEUS_HANDLE
            .set(handle)
            .map_err(|_| anyhow::anyhow!("Prometheus recorder already installed"))?;
        register_metrics();
        Ok(())
    }

    /// Render the current metrics in Prometheus exposition format.
    pub fn render() -> String {
        PROMETHEUS_HANDLE
            .get()
            .map(|h| h.render())
            .unwrap_or_default()
    }

    /// Register all metric descriptions.
    pub fn register_metrics() {
        // Counters
        describe_counter!(
            "mykart_http_requests_total",
            "Total HTTP requests handled, by route and status"
        );
        describe_counter!(
            "mykart_interactions_published_total",
            "Interaction events published, by sink and event type"
        );
        describe_counter!(
            "mykart_stream_publish_failures_total",
            "Interaction events that failed to reach the stream"
        );
        describe_counter!(
            "mykart_orders_placed_total",
            "Orders placed successfully"
        );
        describe_counter!(
            "mykart_errors_total",
            "Errors surfaced to clients, by code and category"
        );

        // Gauges
        describe_gauge!(
            "mykart_db_pool_active_connections",
            "Active database pool connections"
        );
        describe_gauge!(
            "mykart_db_pool_idle_connections",
            "Idle database pool connections"
        );

        // Histograms
        describe_histogram!(
            "mykart_http_request_duration_seconds",
            "HTTP request duration in seconds"
        );
        describe_histogram!(
            "mykart_order_total_dollars",
            "Order totals in dollars"
        );
    }

    /// Record a handled HTTP request.
    pub fn record_http_request(route: &str, status: u16, duration_secs: f64) {
        counter!(
            "mykart_http_requests_total",
            "route" => route.to_string(),
            "status" => status.to_string(),
        )
        .increment(1);
        histogram!("mykart_http_request_duration_seconds", "route" => route.to_string())
            .record(duration_secs);
    }

    /// Record a placed order.
    pub fn record_order_placed(total: f64) {
        counter!("mykart_orders_placed_total").increment(1);
        histogram!("mykart_order_total_dollars").record(total);
    }

    /// Update database pool gauges.
    pub fn set_db_pool_connections(active: u32, idle: u32) {
        gauge!("mykart_db_pool_active_connections").set(active as f64);
        gauge!("mykart_db_pool_idle_connections").set(idle as f64);
    }
}
