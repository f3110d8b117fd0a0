//! Prefix index.
//!
//! A compressed radix trie over folded strings:
//! - `Trie`: incremental insert with node splitting, bounded fuzzy search,
//!   query-result memoization
//! - `ResultCollector`: bounded top-K retention of scored candidates
//! - `SearchOptions` / `MatchType` / `SearchResult`: the search surface
//!
//! There is no delete or rebalance operation; the index only grows.

mod collector;
mod node;
mod options;
mod trie;

pub use collector::ResultCollector;
pub use options::{MatchType, SearchOptions, SearchResult};
pub use trie::Trie;
