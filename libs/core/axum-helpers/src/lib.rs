//! # Axum Helpers
//!
//! Utilities, middleware, and helpers shared by the workspace's Axum
//! applications.
//!
//! ## Modules
//!
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: Custom extractors (numeric id path, validated JSON)
//! - **[`http`]**: HTTP middleware (security headers)
//! - **[`server`]**: Server setup, health checks, graceful shutdown
//! - **[`audit`]**: Audit logging for security-relevant mutations

pub mod audit;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};

// Re-export extractors
pub use extractors::{IdPath, ValidatedJson};

// Re-export server types
pub use server::{
    create_app, create_production_app, create_router, health_router, run_health_checks,
    shutdown_signal, HealthCheckFuture, HealthResponse, ShutdownCoordinator,
};

// Re-export audit types
pub use audit::{extract_ip_from_headers, extract_user_agent, AuditEvent, AuditOutcome};
