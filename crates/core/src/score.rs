use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Tag of the per-algorithm component that contributed most to a
/// `NameScore`'s overall score, or `Exact` when the exact-match
/// short-circuit fired. Enumeration order here is the deterministic
/// tie-break order spec.md S4.2 requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmTag {
    Exact,
    JaroWinkler,
    EditSimilarity,
    TokenSort,
    TokenSet,
    Phonetic,
}

/// Per-algorithm breakdown of a name-vs-name comparison plus the weighted
/// overall score. Every field is in `[0, 1]`; `exact_match` implies
/// `overall_score == 1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NameScore {
    pub jaro_winkler: f64,
    pub edit_similarity: f64,
    pub token_sort: f64,
    pub token_set: f64,
    pub phonetic: f64,
    pub exact_match: bool,
    pub overall_score: f64,
    pub algorithm_used: AlgorithmTag,
}

impl NameScore {
    pub fn exact() -> Self {
        Self {
            jaro_winkler: 1.0,
            edit_similarity: 1.0,
            token_sort: 1.0,
            token_set: 1.0,
            phonetic: 1.0,
            exact_match: true,
            overall_score: 1.0,
            algorithm_used: AlgorithmTag::Exact,
        }
    }
}

/// A `NameScore` plus attribute concordance, combined and clamped into the
/// single score the matcher ranks and thresholds against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentedScore {
    pub name_score: NameScore,
    pub dob_match: bool,
    pub nationality_match: bool,
    pub id_match: bool,
    /// Boost deltas actually applied, keyed by attribute name (`"dob"`,
    /// `"nationality"`, `"id"`); absent keys were not applicable.
    pub applied_boosts: BTreeMap<String, f64>,
    pub combined_score: f64,
}
