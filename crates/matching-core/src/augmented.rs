//! Attribute-concordance boosts layered on top of a name score.

use chrono::NaiveDate;
use screening_core::{AugmentedScore, NameScore};

const DOB_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d-%m-%Y",
    "%m-%d-%Y",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%Y.%m.%d",
    "%d.%m.%Y",
    "%m.%d.%Y",
];

const DOB_BOOST: f64 = 0.15;
const NATIONALITY_BOOST: f64 = 0.05;
const IDENTIFIER_BOOST: f64 = 0.20;

/// Canonical nationality groups; members of a group are treated as
/// equivalent for the nationality boost regardless of which form either
/// side used.
const NATIONALITY_GROUPS: &[&[&str]] = &[
    &["uae", "united arab emirates", "emirates"],
    &["ksa", "saudi arabia", "kingdom of saudi arabia", "saudi"],
    &["usa", "united states", "united states of america", "america"],
    &["uk", "united kingdom", "great britain", "britain", "england"],
];

fn parse_dob(raw: &str) -> Option<NaiveDate> {
    DOB_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw.trim(), fmt).ok())
}

fn canonical_nationality(value: &str) -> String {
    let folded = value.trim().to_lowercase();
    for group in NATIONALITY_GROUPS {
        if group.contains(&folded.as_str()) {
            return group[0].to_string();
        }
    }
    folded
}

fn clean_identifier(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect::<String>()
        .to_uppercase()
}

/// Combines a `NameScore` with DOB/nationality/identifier concordance into
/// an `AugmentedScore`. An unparseable DOB is silently treated as no boost
/// per spec.md S7's downgrade rule — this function never fails and never
/// warns.
pub fn augment(
    name_score: NameScore,
    query_dob: Option<&str>,
    entry_dob: Option<&str>,
    query_nationality: Option<&str>,
    entry_nationality: Option<&str>,
    query_identifier: Option<&str>,
    entry_identifier: Option<&str>,
) -> AugmentedScore {
    let mut applied_boosts = std::collections::BTreeMap::new();

    let dob_match = match (query_dob, entry_dob) {
        (Some(q), Some(e)) => match (parse_dob(q), parse_dob(e)) {
            (Some(qd), Some(ed)) => qd == ed,
            _ => false,
        },
        _ => false,
    };
    if dob_match {
        applied_boosts.insert("dob".to_string(), DOB_BOOST);
    }

    let nationality_match = match (query_nationality, entry_nationality) {
        (Some(q), Some(e)) => {
            q.trim().eq_ignore_ascii_case(e.trim()) || canonical_nationality(q) == canonical_nationality(e)
        }
        _ => false,
    };
    if nationality_match {
        applied_boosts.insert("nationality".to_string(), NATIONALITY_BOOST);
    }

    let id_match = match (query_identifier, entry_identifier) {
        (Some(q), Some(e)) => clean_identifier(q) == clean_identifier(e),
        _ => false,
    };
    if id_match {
        applied_boosts.insert("id".to_string(), IDENTIFIER_BOOST);
    }

    let boost_total: f64 = applied_boosts.values().sum();
    let combined_score = (name_score.overall_score + boost_total).min(1.0);

    AugmentedScore {
        name_score,
        dob_match,
        nationality_match,
        id_match,
        applied_boosts,
        combined_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screening_core::AlgorithmTag;

    fn base_score(overall: f64) -> NameScore {
        NameScore {
            jaro_winkler: overall,
            edit_similarity: overall,
            token_sort: overall,
            token_set: overall,
            phonetic: overall,
            exact_match: false,
            overall_score: overall,
            algorithm_used: AlgorithmTag::JaroWinkler,
        }
    }

    #[test]
    fn matching_dob_applies_boost() {
        let score = augment(base_score(0.7), Some("1975-03-15"), Some("15/03/1975"), None, None, None, None);
        assert!(score.dob_match);
        assert_eq!(score.applied_boosts.get("dob"), Some(&DOB_BOOST));
    }

    #[test]
    fn unparseable_dob_downgrades_to_no_boost_silently() {
        let score = augment(base_score(0.7), Some("not-a-date"), Some("1975-03-15"), None, None, None, None);
        assert!(!score.dob_match);
        assert!(score.applied_boosts.is_empty());
    }

    #[test]
    fn nationality_alias_table_matches() {
        let score = augment(
            base_score(0.7),
            None,
            None,
            Some("Emirates"),
            Some("United Arab Emirates"),
            None,
            None,
        );
        assert!(score.nationality_match);
    }

    #[test]
    fn identifier_match_ignores_whitespace_hyphens_and_case() {
        let score = augment(base_score(0.7), None, None, None, None, Some("p-123 456"), Some("P123456"));
        assert!(score.id_match);
    }

    #[test]
    fn combined_score_clamps_to_one() {
        let score = augment(
            base_score(0.95),
            Some("1975-03-15"),
            Some("1975-03-15"),
            Some("Syrian"),
            Some("Syrian"),
            Some("N1"),
            Some("N1"),
        );
        assert_eq!(score.combined_score, 1.0);
    }

    #[test]
    fn missing_attribute_on_either_side_never_boosts() {
        let score = augment(base_score(0.7), Some("1975-03-15"), None, None, None, None, None);
        assert!(!score.dob_match);
        assert!(score.applied_boosts.is_empty());
    }
}
