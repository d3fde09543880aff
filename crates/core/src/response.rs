use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::CorpusEntry;
use crate::query::EntityKindTag;
use crate::score::AugmentedScore;
use crate::warning::ScreeningWarning;

/// Risk band derived from a response's highest combined score. Declared in
/// ascending order so the derived `Ord` gives risk monotonicity for free
/// (spec.md S8 invariant 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Outcome status of a screening response. `Flagged`, `FalsePositive`, and
/// `TrueMatch` are terminal states assigned by the external case-management
/// workflow this core feeds (out of scope per spec.md S1); the screening
/// core itself only ever produces `Released`, `PendingReview`, or
/// `Escalated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Released,
    PendingReview,
    Escalated,
    Flagged,
    FalsePositive,
    TrueMatch,
}

/// One candidate that cleared the threshold: a reference to its
/// `CorpusEntry`, which surface name matched, and the score that produced
/// it. `entry` is reference-counted rather than borrowed so a response can
/// outlive the `CorpusView` it was built from (spec.md S3's ownership note).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub entry: Arc<CorpusEntry>,
    pub matched_name: String,
    pub is_alias_match: bool,
    pub score: AugmentedScore,
}

impl MatchResult {
    pub fn combined_score(&self) -> f64 {
        self.score.combined_score
    }
}

/// The complete result of screening one query against one corpus view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningResponse {
    pub reference_id: String,
    pub screened_name: String,
    pub entity_kind: EntityKindTag,
    /// Sorted by `combined_score` descending, capped at `max_results`.
    pub matches: Vec<MatchResult>,
    pub highest_score: f64,
    pub risk_level: RiskLevel,
    pub processing_time_ms: u64,
    pub lists_screened: BTreeSet<String>,
    pub timestamp: DateTime<Utc>,
    pub overall_status: OverallStatus,
    pub auto_released: bool,
    pub warnings: Vec<ScreeningWarning>,
}

impl ScreeningResponse {
    pub fn total_matches(&self) -> usize {
        self.matches.len()
    }
}
