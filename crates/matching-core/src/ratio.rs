//! Ratcliff/Obershelp-equivalent character similarity (the algorithm
//! behind Python's `difflib.SequenceMatcher.ratio()`, which the fuzzy
//! "token sort/set ratio" recipes are themselves built on). No crate in
//! this corpus wraps `rapidfuzz`, so the matching-blocks recursion is
//! implemented directly; inputs are short, already-normalized ASCII
//! names, so the O(n*m) per call is not a concern.

fn longest_match(a: &[u8], b: &[u8]) -> (usize, usize, usize) {
    if a.is_empty() || b.is_empty() {
        return (0, 0, 0);
    }
    let (rows, cols) = (a.len() + 1, b.len() + 1);
    let mut dp = vec![0usize; rows * cols];
    let mut best_len = 0;
    let mut best_i = 0;
    let mut best_j = 0;
    for i in 1..rows {
        for j in 1..cols {
            if a[i - 1] == b[j - 1] {
                let v = dp[(i - 1) * cols + (j - 1)] + 1;
                dp[i * cols + j] = v;
                if v > best_len {
                    best_len = v;
                    best_i = i;
                    best_j = j;
                }
            }
        }
    }
    (best_i.saturating_sub(best_len), best_j.saturating_sub(best_len), best_len)
}

fn matching_block_len(a: &[u8], b: &[u8]) -> usize {
    let (i, j, len) = longest_match(a, b);
    if len == 0 {
        return 0;
    }
    let left = matching_block_len(&a[..i], &b[..j]);
    let right = matching_block_len(&a[i + len..], &b[j + len..]);
    len + left + right
}

/// `2*M / (len(a) + len(b))` where `M` is the total length of matching
/// blocks found by recursively locating the longest common substring.
/// Two empty strings are considered identical (ratio 1.0).
pub fn character_ratio(a: &str, b: &str) -> f64 {
    let (ab, bb) = (a.as_bytes(), b.as_bytes());
    if ab.is_empty() && bb.is_empty() {
        return 1.0;
    }
    let m = matching_block_len(ab, bb);
    (2.0 * m as f64) / (ab.len() + bb.len()) as f64
}

/// Token-sort ratio: sort each side's whitespace tokens lexicographically,
/// rejoin, and compute the character ratio.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    character_ratio(&sorted_join(a), &sorted_join(b))
}

fn sorted_join(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Token-set ratio, per the standard recipe: partition tokens into the
/// intersection and each side's remainder, build three candidate strings
/// from sorted intersection / intersection+remainder, and take the
/// maximum pairwise character ratio among them.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    use std::collections::BTreeSet;

    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    let intersection: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let diff_a: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let diff_b: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    let sorted_sect = intersection.join(" ");
    let sorted_1 = join_nonempty(&sorted_sect, &diff_a.join(" "));
    let sorted_2 = join_nonempty(&sorted_sect, &diff_b.join(" "));

    let r0 = character_ratio(&sorted_sect, &sorted_1);
    let r1 = character_ratio(&sorted_sect, &sorted_2);
    let r2 = character_ratio(&sorted_1, &sorted_2);

    r0.max(r1).max(r2)
}

fn join_nonempty(a: &str, b: &str) -> String {
    if a.is_empty() {
        b.to_string()
    } else if b.is_empty() {
        a.to_string()
    } else {
        format!("{a} {b}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_ratio_one() {
        assert_eq!(character_ratio("same", "same"), 1.0);
    }

    #[test]
    fn disjoint_strings_ratio_zero() {
        assert_eq!(character_ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn token_sort_ignores_word_order() {
        let r = token_sort_ratio("smith john", "john smith");
        assert_eq!(r, 1.0);
    }

    #[test]
    fn token_set_handles_subset_names() {
        let r = token_set_ratio("john smith", "john michael smith");
        assert!(r > 0.9);
    }
}
