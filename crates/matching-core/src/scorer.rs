//! Multi-algorithm name similarity over two already-normalized names.

use std::collections::HashSet;

use rphonetic::{Encoder, Metaphone};
use screening_core::{AlgorithmTag, AlgorithmWeights, NameScore, ScreeningError};
use strsim::jaro_winkler;

use crate::normalizer::generate_variations;
use crate::ratio::{token_set_ratio, token_sort_ratio};

fn edit_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let distance = strsim::levenshtein(a, b);
    1.0 - (distance as f64 / max_len as f64)
}

fn phonetic_similarity(a: &str, b: &str) -> f64 {
    let tokens_a: Vec<&str> = a.split_whitespace().collect();
    let tokens_b: Vec<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }
    let encoder = Metaphone::default();
    let codes_a: HashSet<String> = tokens_a.iter().map(|t| encoder.encode(t)).collect();
    let codes_b: HashSet<String> = tokens_b.iter().map(|t| encoder.encode(t)).collect();
    let intersection = codes_a.intersection(&codes_b).count();
    intersection as f64 / codes_a.len().max(codes_b.len()) as f64
}

fn pick_algorithm(scores: [(AlgorithmTag, f64); 5]) -> AlgorithmTag {
    let mut best = scores[0];
    for candidate in &scores[1..] {
        if candidate.1 > best.1 {
            best = *candidate;
        }
    }
    best.0
}

/// Caps the cartesian product of two variant sets to `pair_cap` total
/// combinations by truncating each side to `floor(sqrt(pair_cap))`
/// variants (spec.md S4.2).
fn cap_variant_pairs(a: Vec<String>, b: Vec<String>, pair_cap: usize) -> (Vec<String>, Vec<String>) {
    if a.len().saturating_mul(b.len()) <= pair_cap {
        return (a, b);
    }
    let side_cap = ((pair_cap as f64).sqrt().floor() as usize).max(1);
    (
        a.into_iter().take(side_cap).collect(),
        b.into_iter().take(side_cap).collect(),
    )
}

/// Scores two already-normalized names against the five fixed algorithms
/// and combines them under a configurable, validated weight set.
pub struct NameScorer {
    weights: AlgorithmWeights,
}

impl NameScorer {
    pub fn new(weights: AlgorithmWeights) -> Result<Self, ScreeningError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    /// Compare two names, normalizing neither: callers pass already
    /// normalized (or variant) strings.
    pub fn score(&self, a: &str, b: &str) -> NameScore {
        if a.eq_ignore_ascii_case(b) {
            return NameScore::exact();
        }

        let jw = jaro_winkler(a, b);
        let edit = edit_similarity(a, b);
        let token_sort = token_sort_ratio(a, b);
        let token_set = token_set_ratio(a, b);
        let phonetic = phonetic_similarity(a, b);

        let overall = self.weights.jaro_winkler * jw
            + self.weights.edit_similarity * edit
            + self.weights.token_sort * token_sort
            + self.weights.token_set * token_set
            + self.weights.phonetic * phonetic;

        let algorithm_used = pick_algorithm([
            (AlgorithmTag::JaroWinkler, jw),
            (AlgorithmTag::EditSimilarity, edit),
            (AlgorithmTag::TokenSort, token_sort),
            (AlgorithmTag::TokenSet, token_set),
            (AlgorithmTag::Phonetic, phonetic),
        ]);

        NameScore {
            jaro_winkler: jw,
            edit_similarity: edit,
            token_sort,
            token_set,
            phonetic,
            exact_match: false,
            overall_score: overall.clamp(0.0, 1.0),
            algorithm_used,
        }
    }

    /// Score the best pairing across each side's generated variations,
    /// capped to avoid combinatorial blowup.
    pub fn score_with_variations(
        &self,
        a: &str,
        b: &str,
        max_variants: usize,
        variant_pair_cap: usize,
    ) -> NameScore {
        let variants_a = generate_variations(a, max_variants);
        let variants_b = generate_variations(b, max_variants);
        let (variants_a, variants_b) = cap_variant_pairs(variants_a, variants_b, variant_pair_cap);

        let mut best: Option<NameScore> = None;
        for va in &variants_a {
            for vb in &variants_b {
                let candidate = self.score(va, vb);
                best = Some(match best {
                    Some(current) if current.overall_score >= candidate.overall_score => current,
                    _ => candidate,
                });
            }
        }
        best.unwrap_or_else(|| self.score(a, b))
    }

    /// Cheap pre-filter: false when the shorter/longer length ratio is
    /// below 0.5 or Jaro-Winkler similarity is below `threshold`.
    pub fn might_match(&self, a: &str, b: &str, threshold: f64) -> bool {
        let (la, lb) = (a.chars().count(), b.chars().count());
        let longer = la.max(lb);
        if longer == 0 {
            return true;
        }
        let shorter = la.min(lb);
        if (shorter as f64 / longer as f64) < 0.5 {
            return false;
        }
        jaro_winkler(a, b) >= threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> NameScorer {
        NameScorer::new(AlgorithmWeights::default()).unwrap()
    }

    #[test]
    fn identical_names_are_exact() {
        let score = scorer().score("mohammad rashid", "Mohammad Rashid");
        assert!(score.exact_match);
        assert_eq!(score.overall_score, 1.0);
    }

    #[test]
    fn dissimilar_names_score_low() {
        let score = scorer().score("jane smith", "xi wang");
        assert!(score.overall_score < 0.5);
    }

    #[test]
    fn algorithm_used_matches_max_component() {
        let score = scorer().score("jon smith", "john smith");
        let components = [
            score.jaro_winkler,
            score.edit_similarity,
            score.token_sort,
            score.token_set,
            score.phonetic,
        ];
        let max = components.iter().cloned().fold(f64::MIN, f64::max);
        // the winning component must be at least as large as every other
        let winning_value = match score.algorithm_used {
            screening_core::AlgorithmTag::JaroWinkler => score.jaro_winkler,
            screening_core::AlgorithmTag::EditSimilarity => score.edit_similarity,
            screening_core::AlgorithmTag::TokenSort => score.token_sort,
            screening_core::AlgorithmTag::TokenSet => score.token_set,
            screening_core::AlgorithmTag::Phonetic => score.phonetic,
            screening_core::AlgorithmTag::Exact => unreachable!(),
        };
        assert_eq!(winning_value, max);
    }

    #[test]
    fn might_match_rejects_short_fragment_against_long_name() {
        assert!(!scorer().might_match("al", "abdullah al rashid al maktoum", 0.5));
    }

    #[test]
    fn score_with_variations_beats_plain_score_for_spelling_variant() {
        let plain = scorer().score("mohamed alrashid", "mohammad al rashid");
        let variant = scorer().score_with_variations("Mohamed Alrashid", "Mohammad Al-Rashid", 32, 256);
        assert!(variant.overall_score >= plain.overall_score);
    }
}
