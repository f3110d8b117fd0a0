use std::collections::HashSet;

use tracing::debug;

use crate::cache::QueryCache;
use crate::distance::{levenshtein, partial_distance};
use crate::utils::{decompose, fold, folded_word_count};

use super::collector::ResultCollector;
use super::node::TrieNode;
use super::options::{MatchType, SearchOptions, SearchResult};

/// Default bound on memoized query result sets (FIFO eviction).
const QUERY_CACHE_CAPACITY: usize = 1000;
/// Loose recall-favoring multiple of `max_distance` that bounds traversal.
const TRAVERSAL_SLACK: f64 = 3.0;
/// Extra edit budget granted per word to multi-word candidates.
const MULTI_WORD_BUDGET: f64 = 1.2;
const PREFIX_MATCH_BONUS: f64 = 1.5;
const WORD_COUNT_PENALTY: f64 = 0.1;

/// Compressed prefix tree with fuzzy search.
///
/// Inserted strings are folded (NFD, lowercase, punctuation stripped) for
/// indexing while the decomposed original is kept as the display value.
/// Insert and search never fail; malformed input degrades to a no-op or an
/// empty result. There is no delete operation.
pub struct Trie {
    root: TrieNode,
    cache: QueryCache<Vec<SearchResult>>,
    /// Running count of distinct indexed words; the frequency-weight
    /// denominator in scoring.
    word_count: u64,
    /// Scorer invocations across all uncached searches; instrumentation
    /// for observing cache behavior.
    scored_candidates: u64,
}

impl Trie {
    pub fn new() -> Self {
        Self::with_cache_capacity(QUERY_CACHE_CAPACITY)
    }

    pub fn with_cache_capacity(capacity: usize) -> Self {
        Self {
            root: TrieNode::new(),
            cache: QueryCache::new(capacity),
            word_count: 0,
            scored_candidates: 0,
        }
    }

    /// Index `word` with an occurrence weight of 1.
    pub fn insert(&mut self, word: &str) {
        self.insert_weighted(word, 1);
    }

    /// Index `word` with the given occurrence weight. Re-inserting an
    /// existing word adds to its frequency instead of duplicating a node.
    /// Empty or all-punctuation input is a no-op.
    pub fn insert_weighted(&mut self, word: &str, frequency: u32) {
        let folded = fold(word);
        if folded.is_empty() {
            return;
        }
        let display = decompose(word);

        let mut node = &mut self.root;
        let mut rest = folded.as_str();
        loop {
            if rest.is_empty() {
                if node.is_terminal {
                    node.frequency += frequency;
                } else {
                    node.is_terminal = true;
                    node.value = Some(display);
                    node.frequency = frequency;
                    self.word_count += 1;
                }
                debug!(word = %folded, "indexed word");
                return;
            }

            let matched = node.children.keys().find_map(|edge| {
                let common = common_prefix_len(edge, rest);
                (common > 0).then(|| (edge.clone(), common))
            });

            match matched {
                None => {
                    // No overlapping edge: the whole remaining suffix
                    // becomes a new leaf edge.
                    let mut leaf = TrieNode::new();
                    leaf.is_terminal = true;
                    leaf.value = Some(display);
                    leaf.frequency = frequency;
                    leaf.prefix_count = 1;
                    node.children.insert(rest.to_string(), leaf);
                    self.word_count += 1;
                    debug!(word = %folded, "indexed word");
                    return;
                }
                Some((edge, common)) if common == edge.len() => {
                    // Exact edge match descends.
                    rest = &rest[common..];
                    node = node
                        .children
                        .get_mut(&edge)
                        .expect("matched edge must exist");
                    node.prefix_count += 1;
                    if edge.ends_with(' ') {
                        node.is_word_boundary = true;
                    }
                }
                Some((edge, common)) => {
                    // Partial overlap: split the edge into a shared-prefix
                    // node holding the old subtree and, when the new word
                    // continues past the shared part, a fresh leaf.
                    let old_child = node
                        .children
                        .remove(&edge)
                        .expect("matched edge must exist");
                    let shared = edge[..common].to_string();
                    let old_remainder = edge[common..].to_string();
                    let new_remainder = &rest[common..];

                    let mut mid = TrieNode::new();
                    mid.prefix_count = old_child.prefix_count + 1;
                    if shared.ends_with(' ') {
                        mid.is_word_boundary = true;
                    }
                    mid.children.insert(old_remainder, old_child);

                    if new_remainder.is_empty() {
                        mid.is_terminal = true;
                        mid.value = Some(display);
                        mid.frequency = frequency;
                    } else {
                        let mut leaf = TrieNode::new();
                        leaf.is_terminal = true;
                        leaf.value = Some(display);
                        leaf.frequency = frequency;
                        leaf.prefix_count = 1;
                        mid.children.insert(new_remainder.to_string(), leaf);
                    }
                    node.children.insert(shared, mid);
                    self.word_count += 1;
                    debug!(word = %folded, "indexed word (edge split)");
                    return;
                }
            }
        }
    }

    /// Fuzzy search over the index, returning display values best-first.
    ///
    /// Empty or whitespace queries return an empty list with no side
    /// effects. Full result sets are memoized per normalized query and
    /// option set until `clear_cache` or FIFO eviction.
    pub fn search(&mut self, query: &str, options: &SearchOptions) -> Vec<String> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let folded = fold(query);
        if folded.is_empty() {
            return Vec::new();
        }

        let options_key = serde_json::to_string(options).unwrap_or_default();
        let cache_key = format!("{folded}:{options_key}");
        if let Some(cached) = self.cache.get(&cache_key) {
            debug!(query = %folded, "query cache hit");
            return cached.iter().map(|r| r.item.clone()).collect();
        }

        let mut pass = SearchPass {
            query: &folded,
            options,
            total_words: self.word_count,
            seen: HashSet::new(),
            collector: ResultCollector::new(options.max_results),
            scored: 0,
        };
        pass.visit(&self.root, String::new(), 0, 0.0);

        self.scored_candidates += pass.scored;
        let results = pass.collector.into_results();
        let items: Vec<String> = results.iter().map(|r| r.item.clone()).collect();
        debug!(query = %folded, results = items.len(), "search computed");
        self.cache.insert(cache_key, results);
        items
    }

    /// Empty the query cache. Index contents are unaffected.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Distinct words indexed so far.
    pub fn word_count(&self) -> u64 {
        self.word_count
    }

    /// Total scorer invocations across uncached searches.
    pub fn scored_candidates(&self) -> u64 {
        self.scored_candidates
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

/// One depth-first traversal of the trie for a single query.
struct SearchPass<'a> {
    /// Folded query; pure ASCII, so byte offsets are char offsets.
    query: &'a str,
    options: &'a SearchOptions,
    total_words: u64,
    seen: HashSet<String>,
    collector: ResultCollector,
    scored: u64,
}

impl SearchPass<'_> {
    fn visit(&mut self, node: &TrieNode, prefix: String, depth: usize, prefix_distance: f64) {
        if prefix_distance > self.options.max_distance * TRAVERSAL_SLACK {
            return;
        }

        if node.is_terminal
            && let Some(value) = &node.value
        {
            self.consider(node, value, prefix_distance);
        }

        for (edge, child) in &node.children {
            if node.is_word_boundary && self.query.contains(' ') {
                // Word-aligned descent: only follow edges that could start
                // the query word at this position.
                let query_words: Vec<&str> = self.query.split(' ').collect();
                let word_index = prefix.split(' ').count().saturating_sub(1);
                let current_word = query_words.get(word_index).copied().unwrap_or("");
                if current_word.is_empty() || common_prefix_len(edge, current_word) > 0 {
                    self.visit(
                        child,
                        format!("{prefix}{edge}"),
                        depth + edge.len(),
                        prefix_distance,
                    );
                }
            } else if self.options.prefix_only {
                let remaining = &self.query[depth.min(self.query.len())..];
                let common = common_prefix_len(remaining, edge);
                if common > 0 {
                    self.visit(
                        child,
                        format!("{prefix}{edge}"),
                        depth + common,
                        prefix_distance,
                    );
                }
            } else {
                // The accumulated edge distance is bounded by the loose
                // traversal slack, not the scoring cutoff; a long edge must
                // not be pruned harder than a chain of short ones would be.
                let next_prefix = format!("{prefix}{edge}");
                let upto = (depth + edge.len()).min(self.query.len());
                let edge_distance = levenshtein(
                    &self.query[..upto],
                    &next_prefix,
                    self.options.max_distance * TRAVERSAL_SLACK,
                );
                self.visit(child, next_prefix, depth + edge.len(), edge_distance);
            }
        }
    }

    fn consider(&mut self, node: &TrieNode, value: &str, prefix_distance: f64) {
        let candidate = if self.options.case_sensitive {
            value.to_string()
        } else {
            value.to_lowercase()
        };
        if self.seen.contains(&candidate) {
            return;
        }

        let mut prefix_match = false;
        let distance = match self.options.match_type {
            MatchType::Partial => {
                partial_distance(self.query, &candidate, self.options.max_distance)
            }
            MatchType::Exact => {
                if self.options.prefix_only {
                    prefix_match = prefix_distance <= self.options.max_distance;
                    prefix_distance
                } else {
                    levenshtein(self.query, &candidate, self.options.max_distance)
                }
            }
        };
        self.scored += 1;

        // Longer phrases get proportionally more edit budget.
        let candidate_words = value.split_whitespace().count();
        let budget = self.options.max_distance
            * if candidate_words > 1 {
                candidate_words as f64 * MULTI_WORD_BUDGET
            } else {
                1.0
            };
        if distance > budget {
            return;
        }

        let mut result = SearchResult {
            item: value.to_string(),
            distance,
            score: 0.0,
            frequency: node.frequency.max(1),
            prefix_match,
        };
        result.score = self.score(&result);
        self.collector.push(result);
        self.seen.insert(candidate);
    }

    fn score(&self, result: &SearchResult) -> f64 {
        let query_words = self.query.split_whitespace().count();
        let result_words = folded_word_count(&result.item);

        let distance_factor = 1.0 / (result.distance + 1.0);
        let frequency_factor =
            (1.0 + f64::from(result.frequency)).ln() / (1.0 + self.total_words as f64).ln();
        let prefix_bonus = if result.prefix_match {
            PREFIX_MATCH_BONUS
        } else {
            1.0
        };
        let word_count_penalty = query_words.abs_diff(result_words) as f64 * WORD_COUNT_PENALTY;

        distance_factor * frequency_factor * prefix_bonus * (1.0 - word_count_penalty)
    }
}

/// Length in bytes of the shared prefix of two ASCII-folded strings.
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.bytes().zip(b.bytes()).take_while(|(x, y)| x == y).count()
}
