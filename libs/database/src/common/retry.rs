use std::fmt::Display;
use std::future::Future;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Retry configuration for database connections
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the initial try
    pub max_retries: u32,

    /// Initial delay between retries in milliseconds
    pub initial_delay_ms: u64,

    /// Maximum delay between retries in milliseconds
    pub max_delay_ms: u64,

    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,

    /// Whether to add jitter to prevent thundering herd
    pub use_jitter: bool,
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay_ms: u64) -> Self {
        self.initial_delay_ms = delay_ms;
        self
    }

    pub fn with_max_delay(mut self, delay_ms: u64) -> Self {
        self.max_delay_ms = delay_ms;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.use_jitter = false;
        self
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 100,
            max_delay_ms: 5000,
            backoff_multiplier: 2.0,
            use_jitter: true,
        }
    }
}

/// Retry an async operation with the default configuration
pub async fn retry<F, Fut, T, E>(operation: F) -> Result<T, E>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    retry_with_backoff(operation, RetryConfig::default()).await
}

/// Retry an async operation with exponential backoff
///
/// The operation runs once, then up to `max_retries` more times. Each failed
/// attempt doubles the delay (bounded by `max_delay_ms`), optionally jittered
/// into the [delay/2, delay] range.
pub async fn retry_with_backoff<F, Fut, T, E>(operation: F, config: RetryConfig) -> Result<T, E>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut delay_ms = config.initial_delay_ms;
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    debug!(attempt, "Operation succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) if attempt < config.max_retries => {
                let sleep_ms = if config.use_jitter {
                    apply_jitter(delay_ms)
                } else {
                    delay_ms
                };

                warn!(
                    attempt = attempt + 1,
                    max_retries = config.max_retries,
                    delay_ms = sleep_ms,
                    "Operation failed, retrying: {}",
                    e
                );

                tokio::time::sleep(Duration::from_millis(sleep_ms)).await;

                delay_ms = ((delay_ms as f64 * config.backoff_multiplier) as u64)
                    .min(config.max_delay_ms);
                attempt += 1;
            }
            Err(e) => {
                warn!(
                    attempts = attempt + 1,
                    "Operation failed, retries exhausted: {}", e
                );
                return Err(e);
            }
        }
    }
}

/// Jitter a delay into the [delay/2, delay] range.
///
/// Derived from the clock's sub-second nanoseconds, which is plenty of spread
/// for connection retries without pulling in an RNG dependency.
fn apply_jitter(delay_ms: u64) -> u64 {
    if delay_ms <= 1 {
        return delay_ms;
    }

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as u64)
        .unwrap_or(0);

    let half = delay_ms / 2;
    half + (nanos % (delay_ms - half + 1))
}
