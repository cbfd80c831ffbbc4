//! Timeout enforcement.
//!
//! # Responsibilities
//! - Bound every wait on a handler continuation
//! - Keep "no deadline" available for callers that need the indefinite wait
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from abandoned continuations

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// The deadline passed before the awaited future finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("deadline of {0:?} elapsed")]
pub struct DeadlineElapsed(pub Duration);

/// Await `future`, giving up after `deadline` when one is set.
pub async fn within<F>(deadline: Option<Duration>, future: F) -> Result<F::Output, DeadlineElapsed>
where
    F: Future,
{
    match deadline {
        Some(limit) => tokio::time::timeout(limit, future)
            .await
            .map_err(|_| DeadlineElapsed(limit)),
        None => Ok(future.await),
    }
}

/// Milliseconds from configuration; zero disables the deadline.
pub fn from_millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}
