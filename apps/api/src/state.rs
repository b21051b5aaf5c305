//! Application state management.
//!
//! Defines the shared application state passed to request handlers that need
//! cross-cutting resources (readiness checks). Domain routers apply their own
//! state internally.

/// Shared application state.
///
/// Cloned per handler; only cheap Arc clones happen under the hood.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: sea_orm::DatabaseConnection,
}
