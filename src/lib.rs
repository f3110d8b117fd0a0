//! Fuzzy-match autocomplete core.
//!
//! A compressed radix trie index with typo-tolerant ranking, bounded
//! result collection, query memoization, and a resilient fetch layer
//! for populating suggestion data from flaky upstreams.
//!
//! The crate is storage- and transport-agnostic: callers insert strings
//! into a [`Trie`] and search it, or wrap their own async fetch callables
//! in a [`FetchManager`] for retry, backoff and offline deferral.

pub mod cache;
pub mod config;
pub mod distance;
pub mod error;
pub mod fetch;
pub mod index;
pub mod utils;

pub use cache::{CacheEntry, QueryCache, TtlCache};
pub use config::{CacheSettings, RetrySettings, SearchSettings, TypeaheadConfig};
pub use distance::{levenshtein, partial_distance};
pub use error::{Result, TypeaheadError};
pub use fetch::{
    FetchManager, JitterSource, RetryConfig, RetryOverrides, ThreadRngJitter, calculate_delay,
};
pub use index::{MatchType, ResultCollector, SearchOptions, SearchResult, Trie};
