//! Pure functions mapping a response's top score to a risk band and
//! overall outcome. No state, no I/O — safe to call from anywhere.

use screening_core::{OverallStatus, RiskLevel};

/// Risk band for `highest_score`, independent of the high-risk threshold:
/// `>= 0.95` critical, `>= 0.85` high, `>= 0.70` medium, else low.
pub fn classify_risk(highest_score: f64) -> RiskLevel {
    if highest_score >= 0.95 {
        RiskLevel::Critical
    } else if highest_score >= 0.85 {
        RiskLevel::High
    } else if highest_score >= 0.70 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Overall status and auto-release flag for a response, given whether it
/// has any matches, its top score, and the configured high-risk threshold.
pub fn classify_outcome(has_matches: bool, highest_score: f64, high_risk_threshold: f64) -> (OverallStatus, bool) {
    if !has_matches {
        return (OverallStatus::Released, true);
    }
    if highest_score >= high_risk_threshold {
        (OverallStatus::Escalated, false)
    } else {
        (OverallStatus::PendingReview, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_bands_match_boundaries() {
        assert_eq!(classify_risk(0.95), RiskLevel::Critical);
        assert_eq!(classify_risk(0.9499), RiskLevel::High);
        assert_eq!(classify_risk(0.85), RiskLevel::High);
        assert_eq!(classify_risk(0.8499), RiskLevel::Medium);
        assert_eq!(classify_risk(0.70), RiskLevel::Medium);
        assert_eq!(classify_risk(0.6999), RiskLevel::Low);
    }

    #[test]
    fn no_matches_is_released_and_auto_released() {
        let (status, auto_released) = classify_outcome(false, 0.0, 0.90);
        assert_eq!(status, OverallStatus::Released);
        assert!(auto_released);
    }

    #[test]
    fn matches_above_high_risk_threshold_are_escalated() {
        let (status, auto_released) = classify_outcome(true, 0.92, 0.90);
        assert_eq!(status, OverallStatus::Escalated);
        assert!(!auto_released);
    }

    #[test]
    fn matches_below_high_risk_threshold_are_pending_review() {
        let (status, auto_released) = classify_outcome(true, 0.80, 0.90);
        assert_eq!(status, OverallStatus::PendingReview);
        assert!(!auto_released);
    }

    #[test]
    fn risk_monotonic_with_score() {
        let scores = [0.1, 0.5, 0.71, 0.86, 0.96];
        for pair in scores.windows(2) {
            assert!(classify_risk(pair[1]) >= classify_risk(pair[0]));
        }
    }
}
