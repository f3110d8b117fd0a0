use super::options::SearchResult;

/// Retains the top-K scored candidates seen so far.
///
/// `push` keeps the backing vector sorted descending by score and drops the
/// lowest entry once capacity is exceeded. Linear re-sorting is fine at
/// typeahead sizes (capacity defaults to 10). Ties keep insertion order as
/// produced by the sort, which is not a guaranteed ordering.
#[derive(Debug)]
pub struct ResultCollector {
    items: Vec<SearchResult>,
    capacity: usize,
}

impl ResultCollector {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity.saturating_add(1)),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, result: SearchResult) {
        self.items.push(result);
        self.items.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        if self.items.len() > self.capacity {
            self.items.pop();
        }
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.items
    }

    pub fn into_results(self) -> Vec<SearchResult> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
