//! Resilient fetch layer.
//!
//! A shared, explicitly constructed coordinator over one TTL cache:
//! - cache-aside reads before any fetch attempt
//! - retry with exponential backoff and jitter
//! - offline detection with a deferred-retry queue drained on reconnect
//!
//! The coordinator performs no network I/O itself; callers supply an
//! asynchronous fetch callable and drive the connectivity signal.

mod manager;
mod retry;

pub use manager::FetchManager;
pub use retry::{JitterSource, RetryConfig, RetryOverrides, ThreadRngJitter, calculate_delay};
