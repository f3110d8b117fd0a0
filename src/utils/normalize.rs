use unicode_normalization::UnicodeNormalization;

/// Unicode canonical decomposition (NFD) without any folding.
///
/// Used for the display value stored on terminal nodes: casing and
/// whitespace are preserved, only the codepoint form is canonicalized.
#[inline]
pub fn decompose(input: &str) -> String {
    input.nfd().collect()
}

/// Fold a string for indexing and matching.
///
/// NFD decomposition, lowercase, then strip everything that is not ASCII
/// alphanumeric or a space. Decomposition first means accented characters
/// reduce to their ASCII base letter ("é" -> "e") instead of disappearing.
/// Spaces survive so word boundaries remain visible to the index.
pub fn fold(input: &str) -> String {
    let filtered: String = input
        .nfd()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();
    // Collapse whitespace runs so edge labels and query slices agree on
    // word positions. The result is pure ASCII with single interior spaces.
    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Number of words in `input` after folding.
#[inline]
pub fn folded_word_count(input: &str) -> usize {
    fold(input).split_whitespace().count()
}
