use std::collections::HashMap;

/// One node of the radix trie.
///
/// Edges carry multi-character labels; sibling labels from one node are
/// prefix-disjoint, enforced by splitting on insert.
#[derive(Debug, Default)]
pub(crate) struct TrieNode {
    pub children: HashMap<String, TrieNode>,
    /// A complete indexed word ends here.
    pub is_terminal: bool,
    /// Reached by consuming a literal space; child edges start a new word.
    pub is_word_boundary: bool,
    /// Display value for terminal nodes: the NFD-decomposed original.
    pub value: Option<String>,
    /// Occurrence weight, bumped on repeated insert.
    pub frequency: u32,
    /// Descendant bookkeeping; maintained but not consulted by search.
    pub prefix_count: u32,
}

impl TrieNode {
    pub fn new() -> Self {
        Self::default()
    }
}
