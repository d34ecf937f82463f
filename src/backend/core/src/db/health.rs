//! Database health monitoring and startup validation.
//!
//! A companion to `Database` that adds health-oriented capabilities without
//! modifying the core database struct:
//! - Migration validation on startup
//! - Connectivity checks with latency tracking
//! - Connection pool metrics for the readiness endpoint

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

use crate::error::{Result, StoreError};

// ═══════════════════════════════════════════════════════════════════════════════
// Migration Validation
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of migration validation.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MigrationValidationResult {
    /// Whether migrations are up to date.
    pub is_current: bool,
    /// Number of applied migrations.
    pub applied_count: usize,
    /// Number of pending migrations.
    pub pending_count: usize,
    /// List of applied migration descriptions.
    pub applied_migrations: Vec<String>,
    /// List of pending migration descriptions.
    pub pending_migrations: Vec<String>,
    /// Validation timestamp.
    pub validated_at: DateTime<Utc>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Connection Pool Metrics
// ═══════════════════════════════════════════════════════════════════════════════

/// Metrics collected from the database connection pool.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ConnectionPoolMetrics {
    /// Total connections in the pool.
    pub pool_size: u32,
    /// Number of idle connections.
    pub idle_connections: u32,
    /// Number of active (in-use) connections.
    pub active_connections: u32,
    /// Maximum configured pool size.
    pub max_connections: u32,
    /// Minimum configured pool size.
    pub min_connections: u32,
    /// Pool utilization percentage.
    pub utilization_pct: f64,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Database Health Monitor
// ═══════════════════════════════════════════════════════════════════════════════

/// Database health monitor providing migration validation, connectivity
/// checks, and pool metrics.
#[derive(Clone)]
pub struct DatabaseHealthMonitor {
    pool: PgPool,
    max_connections: u32,
    min_connections: u32,
}

impl DatabaseHealthMonitor {
    /// Create a new health monitor for the given pool.
    pub fn new(pool: PgPool, max_connections: u32, min_connections: u32) -> Self {
        Self {
            pool,
            max_connections,
            min_connections,
        }
    }

    /// Run migrations with logging.
    pub async fn run_migrations(&self) -> Result<()> {
        info!("Running database migrations...");
        let start = Instant::now();
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Database migration failed");
                StoreError::from(sqlx::Error::Migrate(Box::new(e)))
            })?;
        info!(
            duration_ms = start.elapsed().as_millis() as u64,
            "Database migrations completed"
        );
        Ok(())
    }

    /// Validate that all migrations are applied and return status.
    pub async fn validate_migrations(&self) -> Result<MigrationValidationResult> {
        let migrator = sqlx::migrate!("./migrations");
        let applied: Vec<String> = sqlx::query_scalar(
            "SELECT description FROM _sqlx_migrations ORDER BY installed_on",
        )
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default();

        let all_migrations: Vec<String> =
            migrator.iter().map(|m| m.description.to_string()).collect();
        let pending: Vec<String> = all_migrations
            .iter()
            .filter(|m| !applied.contains(m))
            .cloned()
            .collect();

        let result = MigrationValidationResult {
            is_current: pending.is_empty(),
            applied_count: applied.len(),
            pending_count: pending.len(),
            applied_migrations: applied,
            pending_migrations: pending,
            validated_at: Utc::now(),
        };

        if !result.is_current {
            warn!(
                pending_count = result.pending_count,
                "Database has pending migrations"
            );
        } else {
            info!(
                applied_count = result.applied_count,
                "All database migrations are applied"
            );
        }

        Ok(result)
    }

    /// Run startup validation: execute migrations, validate, and check connectivity.
    pub async fn startup_validation(&self) -> Result<()> {
        self.run_migrations().await?;

        let validation = self.validate_migrations().await?;
        if !validation.is_current {
            return Err(StoreError::new(
                crate::error::ErrorCode::DatabaseError,
                format!(
                    "Database has {} pending migrations after migration run",
                    validation.pending_count
                ),
            ));
        }

        self.check_connectivity().await?;

        info!("Database startup validation passed");
        Ok(())
    }

    /// Check database connectivity by executing a simple query.
    pub async fn check_connectivity(&self) -> Result<Duration> {
        let start = Instant::now();
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Database connectivity check failed");
                StoreError::from(e)
            })?;
        let latency = start.elapsed();
        if latency > Duration::from_millis(100) {
            warn!(
                latency_ms = latency.as_millis() as u64,
                "Database connectivity check latency is high"
            );
        }
        Ok(latency)
    }

    /// Get connection pool metrics.
    pub fn pool_metrics(&self) -> ConnectionPoolMetrics {
        let pool_size = self.pool.size();
        let idle = self.pool.num_idle() as u32;
        let active = pool_size.saturating_sub(idle);
        let utilization = if self.max_connections > 0 {
            (active as f64 / self.max_connections as f64) * 100.0
        } else {
            0.0
        };

        ConnectionPoolMetrics {
            pool_size,
            idle_connections: idle,
            active_connections: active,
            max_connections: self.max_connections,
            min_connections: self.min_connections,
            utilization_pct: utilization,
        }
    }
}
