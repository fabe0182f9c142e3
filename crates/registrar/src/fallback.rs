//! Remote-first execution with a local fallback.
//!
//! Each call makes exactly one attempt against the primary operation. There
//! is no retry and no shared health state between call sites.

use rand::Rng;
use std::fmt::Display;
use std::future::Future;
use tracing::{info, warn};

use crate::error::Result;

/// Runs `operation`; if it fails for any reason, runs `fallback` instead.
///
/// The operation's success value is returned unmodified. Errors raised by
/// the fallback itself propagate to the caller.
///
/// # Arguments
/// * `operation` - The primary (remote) operation
/// * `fallback` - The local substitute, only invoked after a failure
/// * `label` - Name of the call site for logging
pub async fn with_fallback<T, E, Op, Fut, Fb>(operation: Op, fallback: Fb, label: &str) -> Result<T>
where
    Op: FnOnce() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    E: Display,
    Fb: FnOnce() -> Result<T>,
{
    let correlation_id = generate_correlation_id();

    match operation().await {
        Ok(value) => {
            info!(
                correlation_id = %correlation_id,
                label = %label,
                "Remote operation succeeded"
            );
            Ok(value)
        }
        Err(e) => {
            warn!(
                correlation_id = %correlation_id,
                label = %label,
                error = %e,
                "Remote operation failed, using local fallback"
            );
            fallback()
        }
    }
}

/// Generates a short id that ties the log lines of one call together.
fn generate_correlation_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_micros();
    let random: u32 = rand::thread_rng().gen();
    format!("{:x}-{:08x}", timestamp & 0xFFFFFFFF, random)
}
