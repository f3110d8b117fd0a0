//! Approximate string distance.
//!
//! Two kernels feed the index's ranking:
//! - Full Levenshtein distance with an early cutoff (`levenshtein`)
//! - A greedy word-level "bag of words" distance for phrases
//!   (`partial_distance`)
//!
//! Both are infallible; a candidate past the cutoff reports an infinite
//! distance and gets filtered by the caller.

mod levenshtein;
mod partial;

pub use levenshtein::levenshtein;
pub use partial::{MIN_WORD_LENGTH, partial_distance};

/// Slack applied to `max_distance` before the Levenshtein early exit fires.
pub(crate) const EARLY_EXIT_FACTOR: f64 = 1.4;
