//! Caching layers.
//!
//! Two policies over the same concern:
//! - `TtlCache`: time-bounded, unbounded count, lazy expiry on read. Backs
//!   the resilient fetch layer and is exposed for stale-value fallbacks.
//! - `QueryCache`: size-bounded FIFO with no TTL. Memoizes full search
//!   result lists inside the index.

mod query;
mod ttl;

pub use query::QueryCache;
pub use ttl::{CacheEntry, TtlCache};
