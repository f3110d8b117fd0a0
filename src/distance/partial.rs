use super::levenshtein;

/// Words shorter than this never participate in word-level matching.
pub const MIN_WORD_LENGTH: usize = 2;

/// Penalty per unmatched word when the two sides disagree on word count.
const UNMATCHED_WORD_PENALTY: f64 = 1.5;

/// Approximate word-level distance between two phrases.
///
/// Splits both sides on whitespace and greedily pairs each source word
/// (longest first) with the best unused target word by full edit distance.
/// Case-insensitive equality or substring containment short-circuits to 0.
/// This is a heuristic bag-of-words distance, not an optimal alignment.
pub fn partial_distance(source: &str, target: &str, max_distance: f64) -> f64 {
    let source_lower = source.trim().to_lowercase();
    let target_lower = target.trim().to_lowercase();

    let mut source_words: Vec<&str> = source_lower.split_whitespace().collect();
    let target_words: Vec<&str> = target_lower.split_whitespace().collect();
    if source_words.is_empty() || target_words.is_empty() {
        return max_distance + 1.0;
    }

    if source_lower == target_lower
        || source_lower.contains(&target_lower)
        || target_lower.contains(&source_lower)
    {
        return 0.0;
    }

    let mut total_distance = 0.0;
    let mut used_target_words = vec![false; target_words.len()];
    source_words.sort_by_key(|word| std::cmp::Reverse(word.len()));

    for source_word in &source_words {
        if source_word.chars().count() < MIN_WORD_LENGTH {
            continue;
        }
        let mut best_distance = max_distance;
        let mut best_index = None;

        for (i, target_word) in target_words.iter().enumerate() {
            if used_target_words[i] {
                continue;
            }
            if source_word == target_word {
                best_distance = 0.0;
                best_index = Some(i);
                break;
            }
            if source_word.len().abs_diff(target_word.len()) as f64 > max_distance {
                continue;
            }
            let distance = levenshtein(source_word, target_word, max_distance);
            if distance <= best_distance {
                best_distance = distance;
                best_index = Some(i);
            }
        }

        if let Some(i) = best_index {
            used_target_words[i] = true;
            total_distance += best_distance;
        }
    }

    let unmatched_penalty =
        source_words.len().abs_diff(target_words.len()) as f64 * UNMATCHED_WORD_PENALTY;
    total_distance + unmatched_penalty
}
