//! Concurrent evaluation of many queries against a shared corpus view, and
//! the daily re-screening diff built on top of it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use screening_core::{EngineConfig, ScreeningError, ScreeningQuery, ScreeningResponse, ScreeningWarning};
use tracing::warn;

use crate::matcher::Matcher;
use crate::view::CorpusView;

/// A cooperative stop signal, checked between per-query dispatches. Cloning
/// shares the same underlying flag; in-flight scoring when `cancel()` fires
/// is allowed to complete (spec.md S5).
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Per-category counts for a `daily_diff` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchTotals {
    pub total: usize,
    pub new: usize,
    pub cleared: usize,
    pub unchanged: usize,
}

/// Result of comparing a batch run against a prior baseline of scores.
#[derive(Debug, Clone)]
pub struct DiffReport {
    pub new_matches: Vec<ScreeningResponse>,
    pub cleared_matches: Vec<ScreeningResponse>,
    pub unchanged_count: usize,
    pub totals: BatchTotals,
}

/// Fans query-level screening out across a rayon thread pool. Holds a
/// `Matcher` (and therefore a validated `EngineConfig`); construct once and
/// reuse across batches.
pub struct BatchEngine {
    matcher: Matcher,
    config: EngineConfig,
}

impl BatchEngine {
    pub fn new(config: EngineConfig) -> Result<Self, ScreeningError> {
        let matcher = Matcher::new(config)?;
        Ok(Self { matcher, config })
    }

    /// Screens every query in `queries` against `view`, returning responses
    /// in input order with reference `"<batch_id>-<i>"`. A per-query
    /// failure downgrades to a zero-match response carrying a `QueryFailed`
    /// warning rather than aborting the batch. Checked between dispatches:
    /// once `cancellation` is signaled, queries not yet started return the
    /// same downgraded shape instead of being screened.
    pub fn screen_bulk(
        &self,
        queries: &[ScreeningQuery],
        view: &CorpusView,
        threshold: Option<f64>,
        batch_id: &str,
        cancellation: Option<&CancellationToken>,
    ) -> Result<Vec<ScreeningResponse>, ScreeningError> {
        if queries.len() > self.config.max_bulk_queries {
            return Err(ScreeningError::BatchLimitExceeded {
                actual: queries.len(),
                limit: self.config.max_bulk_queries,
            });
        }
        let threshold = threshold.unwrap_or(self.config.default_match_threshold);
        EngineConfig::validate_threshold(threshold)?;

        let responses: Vec<ScreeningResponse> = queries
            .par_iter()
            .enumerate()
            .map(|(i, query)| {
                let reference_id = format!("{batch_id}-{i}");
                if cancellation.map(CancellationToken::is_cancelled).unwrap_or(false) {
                    return cancelled_response(query, reference_id);
                }
                match self.matcher.screen(query, view, Some(threshold), Some(reference_id.clone())) {
                    Ok(response) => response,
                    Err(err) => {
                        warn!(reference_id = %reference_id, error = %err, "query failed during batch screening");
                        failed_response(query, reference_id, &err)
                    }
                }
            })
            .collect();

        Ok(responses)
    }

    /// Runs `screen_bulk`, then classifies each query's reference as
    /// `new` (prior 0, current > 0), `cleared` (prior > 0, current 0), or
    /// `unchanged` against `prior_scores` (default 0 for an unseen
    /// reference). Classification is exhaustive and mutually exclusive.
    pub fn daily_diff(
        &self,
        queries: &[ScreeningQuery],
        view: &CorpusView,
        threshold: Option<f64>,
        batch_id: &str,
        prior_scores: &HashMap<String, f64>,
    ) -> Result<DiffReport, ScreeningError> {
        let responses = self.screen_bulk(queries, view, threshold, batch_id, None)?;

        let mut new_matches = Vec::new();
        let mut cleared_matches = Vec::new();
        let mut unchanged_count = 0;

        for response in responses {
            let prior = prior_scores.get(&response.reference_id).copied().unwrap_or(0.0);
            let current = response.highest_score;
            if prior == 0.0 && current > 0.0 {
                new_matches.push(response);
            } else if prior > 0.0 && current == 0.0 {
                cleared_matches.push(response);
            } else {
                unchanged_count += 1;
            }
        }

        let totals = BatchTotals {
            total: new_matches.len() + cleared_matches.len() + unchanged_count,
            new: new_matches.len(),
            cleared: cleared_matches.len(),
            unchanged: unchanged_count,
        };

        Ok(DiffReport {
            new_matches,
            cleared_matches,
            unchanged_count,
            totals,
        })
    }
}

fn cancelled_response(query: &ScreeningQuery, reference_id: String) -> ScreeningResponse {
    let mut response = Matcher::skipped_response(query, Some(reference_id.clone()));
    response.auto_released = false;
    response.warnings.push(ScreeningWarning::QueryFailed {
        reference_id,
        reason: "batch cancelled before this query was dispatched".to_string(),
    });
    response
}

fn failed_response(query: &ScreeningQuery, reference_id: String, err: &ScreeningError) -> ScreeningResponse {
    let mut response = Matcher::skipped_response(query, Some(reference_id.clone()));
    response.auto_released = false;
    response.warnings.push(ScreeningWarning::QueryFailed {
        reference_id,
        reason: err.to_string(),
    });
    response
}
