//! Shared utility functions.
//!
//! Input normalization used by the index and scorer:
//! - Unicode canonical decomposition (NFD)
//! - ASCII case folding and punctuation stripping
//! - Word counting over folded text

mod normalize;

pub use normalize::{decompose, fold, folded_word_count};
