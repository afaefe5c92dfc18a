//! Bounded retry for cache operations
//!
//! Cache calls get a small fixed number of attempts with a capped backoff
//! (attempt * 50ms, capped at 2s) and then fail soft at the call site.

use std::future::Future;
use std::time::Duration;

use vitrine_common::VitrineError;

pub const MAX_ATTEMPTS: u32 = 3;

const BACKOFF_STEP_MS: u64 = 50;
const BACKOFF_CAP_MS: u64 = 2_000;

/// Delay before the retry following `attempt` (1-based)
pub fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis((u64::from(attempt) * BACKOFF_STEP_MS).min(BACKOFF_CAP_MS))
}

/// Run a cache operation with bounded retry.
///
/// The final error is returned to the caller, which decides whether to
/// degrade (treat as miss / no-op) or propagate.
pub async fn with_retry<T, F, Fut>(operation: &str, mut f: F) -> Result<T, VitrineError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, VitrineError>>,
{
    let mut attempt = 1;
    loop {
        match f().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < MAX_ATTEMPTS => {
                tracing::debug!(operation, attempt, error = %err, "cache operation failed, retrying");
                tokio::time::sleep(backoff_delay(attempt)).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
