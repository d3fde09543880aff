//! Orchestrates one screening: pre-filter, full scoring against primary
//! name and aliases, threshold, rank, cap.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use screening_core::{
    new_reference_id, EngineConfig, EntityKindTag, MatchResult, ScreeningError, ScreeningQuery,
    ScreeningResponse,
};
use tracing::debug;

use crate::augmented::augment;
use crate::normalizer::normalize;
use crate::risk::{classify_outcome, classify_risk};
use crate::scorer::NameScorer;
use crate::view::{CorpusView, IndexedEntry};

/// Stateless orchestrator over a `NameScorer` and the validated config it
/// was built from. Cheap to construct per request, or shared across many.
pub struct Matcher {
    scorer: NameScorer,
    config: EngineConfig,
}

impl Matcher {
    pub fn new(config: EngineConfig) -> Result<Self, ScreeningError> {
        config.validate()?;
        let scorer = NameScorer::new(config.algorithm_weights)?;
        Ok(Self { scorer, config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Screens `query` against `view` under `threshold` (falls back to the
    /// configured default when `None`). `reference_id` is generated when
    /// absent.
    pub fn screen(
        &self,
        query: &ScreeningQuery,
        view: &CorpusView,
        threshold: Option<f64>,
        reference_id: Option<String>,
    ) -> Result<ScreeningResponse, ScreeningError> {
        let threshold = threshold.unwrap_or(self.config.default_match_threshold);
        EngineConfig::validate_threshold(threshold)?;

        let start = Instant::now();
        let reference_id = reference_id.unwrap_or_else(new_reference_id);
        let normalized_query = normalize(&query.display_name, true);
        let prefilter_threshold = 0.7 * threshold;

        let warnings = view.warnings().to_vec();
        let mut lists_seen: BTreeSet<String> = BTreeSet::new();
        let mut results: Vec<MatchResult> = Vec::new();

        for indexed in view.entries() {
            lists_seen.insert(indexed.entry.list_code.clone());

            if !self.survives_prefilter(&normalized_query, indexed, prefilter_threshold) {
                continue;
            }

            if let Some(candidate) = self.best_candidate(query, indexed, &normalized_query) {
                if candidate.score.combined_score >= threshold {
                    results.push(candidate);
                }
            }
        }

        results.sort_by(|a, b| {
            b.combined_score()
                .partial_cmp(&a.combined_score())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.entry.list_code.cmp(&b.entry.list_code))
                .then_with(|| a.entry.source_id.cmp(&b.entry.source_id))
        });
        results.truncate(self.config.max_results);

        let highest_score = results.first().map(|m| m.combined_score()).unwrap_or(0.0);
        let risk_level = classify_risk(highest_score);
        let (overall_status, auto_released) =
            classify_outcome(!results.is_empty(), highest_score, self.config.high_risk_threshold);

        debug!(
            reference_id = %reference_id,
            total_matches = results.len(),
            highest_score,
            "screening complete"
        );

        Ok(ScreeningResponse {
            reference_id,
            screened_name: query.display_name.clone(),
            entity_kind: EntityKindTag::from(&query.entity_kind),
            matches: results,
            highest_score,
            risk_level,
            processing_time_ms: start.elapsed().as_millis() as u64,
            lists_screened: lists_seen,
            timestamp: Utc::now(),
            overall_status,
            auto_released,
            warnings,
        })
    }

    /// Builds the empty-matches, auto-released response a caller returns
    /// without invoking the matcher at all (spec.md S4.4's skip contract).
    pub fn skipped_response(query: &ScreeningQuery, reference_id: Option<String>) -> ScreeningResponse {
        ScreeningResponse {
            reference_id: reference_id.unwrap_or_else(new_reference_id),
            screened_name: query.display_name.clone(),
            entity_kind: EntityKindTag::from(&query.entity_kind),
            matches: Vec::new(),
            highest_score: 0.0,
            risk_level: classify_risk(0.0),
            processing_time_ms: 0,
            lists_screened: BTreeSet::new(),
            timestamp: Utc::now(),
            overall_status: screening_core::OverallStatus::Released,
            auto_released: true,
            warnings: Vec::new(),
        }
    }

    fn survives_prefilter(&self, normalized_query: &str, indexed: &IndexedEntry, prefilter_threshold: f64) -> bool {
        if self
            .scorer
            .might_match(normalized_query, &indexed.normalized_primary, prefilter_threshold)
        {
            return true;
        }
        if !self.config.include_aliases {
            return false;
        }
        indexed
            .normalized_aliases
            .iter()
            .any(|alias| self.scorer.might_match(normalized_query, alias, prefilter_threshold))
    }

    /// Scores the query against the entry's primary name, then against
    /// each alias in declared order, keeping the best by strictly-greater
    /// combined score (spec.md S4.4 step 2.4: ties keep the earlier one).
    fn best_candidate(&self, query: &ScreeningQuery, indexed: &IndexedEntry, normalized_query: &str) -> Option<MatchResult> {
        let entry = &indexed.entry;

        let score_against = |surface: &str| {
            let name_score =
                self.scorer
                    .score_with_variations(normalized_query, surface, self.config.max_variants, self.config.variant_pair_cap);
            augment(
                name_score,
                query.date_of_birth.as_deref(),
                entry.date_of_birth.as_deref(),
                query.nationality.as_deref(),
                entry.nationality.as_deref(),
                query.identifier_for_boost(),
                entry.national_id.as_deref(),
            )
        };

        let mut best_score = score_against(&indexed.normalized_primary);
        let mut best_name = entry.primary_name.clone();
        let mut best_is_alias = false;

        if self.config.include_aliases {
            for (raw_alias, normalized_alias) in entry.aliases.iter().zip(indexed.normalized_aliases.iter()) {
                let alias_score = score_against(normalized_alias);
                if alias_score.combined_score > best_score.combined_score {
                    best_score = alias_score;
                    best_name = raw_alias.clone();
                    best_is_alias = true;
                }
            }
        }

        Some(MatchResult {
            entry: Arc::clone(entry),
            matched_name: best_name,
            is_alias_match: best_is_alias,
            score: best_score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screening_core::{CorpusEntry, EntityKind, EntryKind};
    use std::collections::HashSet;

    fn matcher() -> Matcher {
        Matcher::new(EngineConfig::default()).unwrap()
    }

    fn sample_entry() -> CorpusEntry {
        let mut entry = CorpusEntry::new("OFAC-12345", "OFAC", "OFAC SDN List", EntryKind::Individual, "Mohammad Al-Rashid");
        entry.aliases = vec!["Abu Ahmed".to_string()];
        entry.date_of_birth = Some("1975-03-15".to_string());
        entry.nationality = Some("Syrian".to_string());
        entry
    }

    fn view_with(entries: Vec<CorpusEntry>) -> CorpusView {
        CorpusView::build(entries, &HashSet::new())
    }

    #[test]
    fn exact_primary_match_scores_one() {
        let query = ScreeningQuery::new("Mohammad Al-Rashid", EntityKind::individual())
            .unwrap()
            .with_date_of_birth("1975-03-15")
            .with_nationality("Syrian");
        let view = view_with(vec![sample_entry()]);
        let response = matcher().screen(&query, &view, None, None).unwrap();

        assert_eq!(response.matches.len(), 1);
        assert!(response.matches[0].score.name_score.exact_match);
        assert_eq!(response.matches[0].combined_score(), 1.0);
        assert_eq!(response.risk_level, screening_core::RiskLevel::Critical);
        assert_eq!(response.overall_status, screening_core::OverallStatus::Escalated);
    }

    #[test]
    fn alias_hit_with_attribute_mismatch_skips_nationality_boost() {
        let query = ScreeningQuery::new("Abu Ahmed", EntityKind::individual())
            .unwrap()
            .with_nationality("Lebanese");
        let view = view_with(vec![sample_entry()]);
        let response = matcher().screen(&query, &view, None, None).unwrap();

        assert_eq!(response.matches.len(), 1);
        assert!(response.matches[0].is_alias_match);
        assert_eq!(response.matches[0].matched_name, "Abu Ahmed");
        assert!(!response.matches[0].score.nationality_match);
    }

    #[test]
    fn clean_miss_yields_empty_released_response() {
        let query = ScreeningQuery::new("Jane Smith", EntityKind::individual()).unwrap();
        let view = view_with(vec![sample_entry()]);
        let response = matcher().screen(&query, &view, None, None).unwrap();

        assert!(response.matches.is_empty());
        assert_eq!(response.highest_score, 0.0);
        assert_eq!(response.risk_level, screening_core::RiskLevel::Low);
        assert_eq!(response.overall_status, screening_core::OverallStatus::Released);
        assert!(response.auto_released);
    }

    #[test]
    fn results_respect_threshold_and_sort_order() {
        let mut second = sample_entry();
        second.source_id = "OFAC-99999".to_string();
        second.primary_name = "Mohammed Al Rashid".to_string();
        second.aliases.clear();
        second.date_of_birth = None;
        second.nationality = None;

        let query = ScreeningQuery::new("Mohammad Al-Rashid", EntityKind::individual()).unwrap();
        let view = view_with(vec![second, sample_entry()]);
        let response = matcher().screen(&query, &view, Some(0.5), None).unwrap();

        for result in &response.matches {
            assert!(result.combined_score() >= 0.5);
        }
        for pair in response.matches.windows(2) {
            assert!(pair[0].combined_score() >= pair[1].combined_score());
        }
    }

    #[test]
    fn skipped_response_is_released_and_auto_released() {
        let query = ScreeningQuery::new("Mohammad Al-Rashid", EntityKind::individual()).unwrap();
        let response = Matcher::skipped_response(&query, None);
        assert!(response.matches.is_empty());
        assert_eq!(response.overall_status, screening_core::OverallStatus::Released);
        assert!(response.auto_released);
    }

    #[test]
    fn include_aliases_false_suppresses_alias_matches() {
        let mut config = EngineConfig::default();
        config.include_aliases = false;
        let matcher = Matcher::new(config).unwrap();

        let query = ScreeningQuery::new("Abu Ahmed", EntityKind::individual()).unwrap();
        let view = view_with(vec![sample_entry()]);
        let response = matcher.screen(&query, &view, None, None).unwrap();

        assert!(response.matches.is_empty());
    }

    #[test]
    fn rejects_threshold_outside_range() {
        let query = ScreeningQuery::new("Jane Smith", EntityKind::individual()).unwrap();
        let view = view_with(vec![sample_entry()]);
        let err = matcher().screen(&query, &view, Some(0.1), None).unwrap_err();
        assert!(matches!(err, ScreeningError::InvalidConfiguration(_)));
    }
}
