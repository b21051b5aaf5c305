use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use tracing::debug;

use crate::common::DatabaseError;

/// Check PostgreSQL health with a `SELECT 1` round trip
///
/// Suitable for Kubernetes readiness and liveness probes.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    debug!("Running PostgreSQL health check");

    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1".to_owned());
    db.query_one_raw(stmt).await.map_err(|e| {
        DatabaseError::HealthCheckFailed(format!("PostgreSQL health check failed: {}", e))
    })?;

    debug!("PostgreSQL health check passed");
    Ok(())
}

/// Health check result with timing, for monitoring
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Whether the database is healthy
    pub healthy: bool,

    /// Optional error message if unhealthy
    pub message: Option<String>,

    /// Response time in milliseconds
    pub response_time_ms: u64,
}

impl HealthStatus {
    pub fn healthy(response_time_ms: u64) -> Self {
        Self {
            healthy: true,
            message: None,
            response_time_ms,
        }
    }

    pub fn unhealthy(message: String, response_time_ms: u64) -> Self {
        Self {
            healthy: false,
            message: Some(message),
            response_time_ms,
        }
    }
}

/// Check PostgreSQL health and report the response time
pub async fn check_health_detailed(db: &DatabaseConnection) -> HealthStatus {
    let start = std::time::Instant::now();

    match check_health(db).await {
        Ok(_) => HealthStatus::healthy(start.elapsed().as_millis() as u64),
        Err(e) => HealthStatus::unhealthy(e.to_string(), start.elapsed().as_millis() as u64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_status_healthy() {
        let status = HealthStatus::healthy(42);
        assert!(status.healthy);
        assert_eq!(status.response_time_ms, 42);
        assert!(status.message.is_none());
    }

    #[test]
    fn health_status_unhealthy() {
        let status = HealthStatus::unhealthy("connection failed".to_string(), 100);
        assert!(!status.healthy);
        assert_eq!(status.message.as_deref(), Some("connection failed"));
    }

    // Live health checks against a real database belong in integration tests.
}
