use super::EARLY_EXIT_FACTOR;

/// Levenshtein distance between `source` and `target` with an early cutoff.
///
/// Single-row dynamic programming over the shorter-first ordered pair, so
/// memory is O(min length). Returns `f64::INFINITY` as soon as the match is
/// provably worse than `max_distance * 1.4`: first from the raw length
/// difference, then whenever a full DP row's minimum crosses the bound.
pub fn levenshtein(source: &str, target: &str, max_distance: f64) -> f64 {
    let mut source: Vec<char> = source.chars().collect();
    let mut target: Vec<char> = target.chars().collect();

    let cutoff = max_distance * EARLY_EXIT_FACTOR;
    if source.len().abs_diff(target.len()) as f64 > cutoff {
        return f64::INFINITY;
    }

    if source.len() > target.len() {
        std::mem::swap(&mut source, &mut target);
    }
    let width = source.len();

    let mut previous: Vec<usize> = (0..=width).collect();
    let mut current: Vec<usize> = vec![0; width + 1];

    for (i, target_char) in target.iter().enumerate() {
        current[0] = i + 1;
        let mut row_min = current[0];
        for j in 1..=width {
            let substitution_cost = usize::from(source[j - 1] != *target_char);
            current[j] = (previous[j] + 1)
                .min(current[j - 1] + 1)
                .min(previous[j - 1] + substitution_cost);
            row_min = row_min.min(current[j]);
        }
        if row_min as f64 > cutoff {
            return f64::INFINITY;
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[width] as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings() {
        assert_eq!(levenshtein("kitten", "kitten", 3.0), 0.0);
        assert_eq!(levenshtein("", "", 3.0), 0.0);
    }

    #[test]
    fn test_classic_pairs() {
        assert_eq!(levenshtein("kitten", "sitting", 5.0), 3.0);
        assert_eq!(levenshtein("intention", "execution", 10.0), 5.0);
        assert_eq!(levenshtein("flaw", "lawn", 3.0), 2.0);
    }

    #[test]
    fn test_insertions_and_deletions() {
        assert_eq!(levenshtein("abc", "abcd", 3.0), 1.0);
        assert_eq!(levenshtein("abcd", "abc", 3.0), 1.0);
        assert_eq!(levenshtein("", "abc", 3.0), 3.0);
    }

    #[test]
    fn test_argument_order_is_irrelevant() {
        assert_eq!(
            levenshtein("saturday", "sunday", 5.0),
            levenshtein("sunday", "saturday", 5.0),
        );
    }

    #[test]
    fn test_length_difference_early_exit() {
        // Length delta 10 > 3 * 1.4, no DP work happens.
        assert_eq!(levenshtein("ab", "abcdefghijkl", 3.0), f64::INFINITY);
    }

    #[test]
    fn test_row_minimum_early_exit() {
        // Same length but completely disjoint alphabets.
        assert_eq!(levenshtein("aaaaaaaa", "zzzzzzzz", 2.0), f64::INFINITY);
    }

    #[test]
    fn test_within_slack_is_exact() {
        // Distance 4 exceeds max_distance 3 but stays under 3 * 1.4, so the
        // exact value is still reported; the caller applies its own bound.
        assert_eq!(levenshtein("abcd", "wxyz", 3.0), 4.0);
    }
}
