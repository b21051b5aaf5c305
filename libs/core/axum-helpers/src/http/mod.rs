//! HTTP middleware module.
//!
//! This module provides HTTP-level middleware for:
//! - Security headers
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::http::security_headers;
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers));
//! ```

pub mod security;

pub use security::security_headers;
