//! Configuration management.

use serde::Deserialize;

/// Main application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Redis configuration
    #[serde(default)]
    pub redis: RedisConfig,

    /// Interaction tracking configuration
    #[serde(default)]
    pub tracking: TrackingConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of connections
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    /// Redis connection URL
    #[serde(default = "default_redis_url")]
    pub url: String,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
        }
    }
}

/// Which sink receives user-interaction events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Synchronous inserts into the relational interaction tables.
    #[default]
    Relational,
    /// Asynchronous publishes onto a Redis stream.
    Stream,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackingConfig {
    /// Active interaction sink
    #[serde(default)]
    pub sink: SinkKind,

    /// Redis stream key for interaction events
    #[serde(default = "default_stream_key")]
    pub stream_key: String,

    /// Approximate maximum stream length (XADD MAXLEN ~)
    #[serde(default = "default_stream_maxlen")]
    pub stream_maxlen: usize,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            sink: SinkKind::default(),
            stream_key: default_stream_key(),
            stream_maxlen: default_stream_maxlen(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    /// OpenTelemetry OTLP endpoint
    pub otlp_endpoint: Option<String>,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            otlp_endpoint: None,
            log_level: default_log_level(),
            json_logging: default_json_logging(),
        }
    }
}

// Default value functions
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 3001 }
fn default_max_connections() -> u32 { 20 }
fn default_min_connections() -> u32 { 5 }
fn default_redis_url() -> String { "redis://localhost:6379".to_string() }
fn default_stream_key() -> String { "mykart:interactions".to_string() }
fn default_stream_maxlen() -> usize { 1_000_000 }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { true }

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("MYKART").separator("__"))
            .build()?;

        let cfg: Config = config.try_deserialize()?;
        Ok(cfg)
    }

    /// Load from a specific file path, with environment overrides.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("MYKART").separator("__"))
            .build()?;

        let cfg: Config = config.try_deserialize()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let server = ServerConfig::default();
        assert_eq!(server.port, 3001);

        let tracking = TrackingConfig::default();
        assert_eq!(tracking.sink, SinkKind::Relational);
        assert_eq!(tracking.stream_key, "mykart:interactions");
    }

    #[test]
    fn test_sink_kind_deserialization() {
        let kind: SinkKind = serde_json::from_str("\"stream\"").unwrap();
        assert_eq!(kind, SinkKind::Stream);

        let kind: SinkKind = serde_json::from_str("\"relational\"").unwrap();
        assert_eq!(kind, SinkKind::Relational);
    }
}
