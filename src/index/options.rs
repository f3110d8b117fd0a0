use serde::{Deserialize, Serialize};

/// How candidate distance is computed at a terminal node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Full-string Levenshtein distance against the whole candidate.
    Exact,
    /// Word-level bag-of-words distance; forgiving for phrases.
    #[default]
    Partial,
}

/// Search tuning knobs. Serialized into the query-cache key, so two
/// searches share a cache slot only when every option agrees.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub max_distance: f64,
    pub prefix_only: bool,
    pub case_sensitive: bool,
    pub max_results: usize,
    pub match_type: MatchType,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_distance: 3.0,
            prefix_only: false,
            case_sensitive: false,
            max_results: 10,
            match_type: MatchType::Partial,
        }
    }
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = max_distance;
        self
    }

    pub fn with_prefix_only(mut self, prefix_only: bool) -> Self {
        self.prefix_only = prefix_only;
        self
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_match_type(mut self, match_type: MatchType) -> Self {
        self.match_type = match_type;
        self
    }
}

/// One accepted candidate from a search pass.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Display value as originally inserted (NFD-decomposed, case kept).
    pub item: String,
    pub distance: f64,
    pub score: f64,
    pub frequency: u32,
    /// Whether the match came from pure-prefix traversal.
    pub prefix_match: bool,
}
