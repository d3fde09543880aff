use serde::{Deserialize, Serialize};

use crate::error::ScreeningError;

/// Per-algorithm weights for the name scorer's weighted composition.
/// Must sum to 1 within a small epsilon; validated by `EngineConfig`, not
/// threaded as an ambient singleton (spec.md S9 redesign flag).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmWeights {
    pub jaro_winkler: f64,
    pub edit_similarity: f64,
    pub token_sort: f64,
    pub token_set: f64,
    pub phonetic: f64,
}

impl Default for AlgorithmWeights {
    fn default() -> Self {
        Self {
            jaro_winkler: 0.30,
            edit_similarity: 0.20,
            token_sort: 0.25,
            token_set: 0.15,
            phonetic: 0.10,
        }
    }
}

impl AlgorithmWeights {
    pub fn sum(&self) -> f64 {
        self.jaro_winkler + self.edit_similarity + self.token_sort + self.token_set + self.phonetic
    }

    pub fn validate(&self) -> Result<(), ScreeningError> {
        if (self.sum() - 1.0).abs() > 1e-6 {
            return Err(ScreeningError::InvalidConfiguration(format!(
                "algorithm_weights must sum to 1.0, got {}",
                self.sum()
            )));
        }
        Ok(())
    }
}

/// All configuration the screening core recognizes. Every option has the
/// default spec.md S6 lists; unrecognized options are rejected by whatever
/// boundary builds this value from caller-supplied configuration (a map,
/// an env-derived struct, etc.) — the core itself only ever sees the typed
/// struct.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub default_match_threshold: f64,
    pub high_risk_threshold: f64,
    pub include_aliases: bool,
    pub max_results: usize,
    pub algorithm_weights: AlgorithmWeights,
    pub max_variants: usize,
    pub variant_pair_cap: usize,
    pub max_bulk_queries: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_match_threshold: 0.75,
            high_risk_threshold: 0.90,
            include_aliases: true,
            max_results: 50,
            algorithm_weights: AlgorithmWeights::default(),
            max_variants: 32,
            variant_pair_cap: 256,
            max_bulk_queries: 1000,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ScreeningError> {
        if !(0.5..=1.0).contains(&self.default_match_threshold) {
            return Err(ScreeningError::InvalidConfiguration(format!(
                "default_match_threshold must be within [0.5, 1.0], got {}",
                self.default_match_threshold
            )));
        }
        if !(0.5..=1.0).contains(&self.high_risk_threshold) {
            return Err(ScreeningError::InvalidConfiguration(format!(
                "high_risk_threshold must be within [0.5, 1.0], got {}",
                self.high_risk_threshold
            )));
        }
        self.algorithm_weights.validate()?;
        if self.max_results == 0 {
            return Err(ScreeningError::InvalidConfiguration(
                "max_results must be at least 1".to_string(),
            ));
        }
        if self.max_variants == 0 {
            return Err(ScreeningError::InvalidConfiguration(
                "max_variants must be at least 1".to_string(),
            ));
        }
        if self.variant_pair_cap == 0 {
            return Err(ScreeningError::InvalidConfiguration(
                "variant_pair_cap must be at least 1".to_string(),
            ));
        }
        if self.max_bulk_queries == 0 {
            return Err(ScreeningError::InvalidConfiguration(
                "max_bulk_queries must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate a threshold supplied per-call (spec.md S4.4), independent
    /// of the configured default.
    pub fn validate_threshold(threshold: f64) -> Result<(), ScreeningError> {
        if !(0.5..=1.0).contains(&threshold) {
            return Err(ScreeningError::InvalidConfiguration(format!(
                "threshold must be within [0.5, 1.0], got {threshold}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        EngineConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let mut cfg = EngineConfig::default();
        cfg.algorithm_weights.phonetic = 0.5;
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ScreeningError::InvalidConfiguration(_)));
    }

    #[test]
    fn rejects_threshold_outside_range() {
        let mut cfg = EngineConfig::default();
        cfg.default_match_threshold = 0.2;
        assert!(cfg.validate().is_err());
    }
}
