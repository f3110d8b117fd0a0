//! Configuration types and loading.
//!
//! `TypeaheadConfig` gathers the tunables of the three subsystems
//! (search defaults, cache bounds, retry/backoff) with TOML persistence
//! and validation.

mod settings;

pub use settings::{CacheSettings, RetrySettings, SearchSettings, TypeaheadConfig};
