//! Utilities shared by all database-facing code

pub mod error;
pub mod retry;

pub use error::{DatabaseError, DatabaseResult};
pub use retry::{retry, retry_with_backoff, RetryConfig};
