//! The immutable, eagerly-normalized snapshot of active corpus entries the
//! Matcher screens against. All derived fields are computed once here at
//! construction time; screening itself never renormalizes.

use std::collections::HashSet;
use std::sync::Arc;

use screening_core::{CorpusEntry, ScreeningWarning};

use crate::normalizer::normalize;

/// A corpus entry plus its cached normalized fields. `entry` is
/// reference-counted so a `MatchResult` can hold onto it past this view's
/// lifetime.
#[derive(Debug, Clone)]
pub struct IndexedEntry {
    pub entry: Arc<CorpusEntry>,
    pub normalized_primary: String,
    pub normalized_aliases: Vec<String>,
}

/// An immutable snapshot of the currently-active corpus. Constructing a
/// view is the only place normalization runs over corpus data; screening
/// reads `normalized_primary`/`normalized_aliases` without recomputing them.
#[derive(Debug, Clone)]
pub struct CorpusView {
    entries: Vec<IndexedEntry>,
    warnings: Vec<ScreeningWarning>,
}

impl CorpusView {
    /// Builds a view from raw entries, skipping any whose primary name is
    /// empty after trim (recorded as `EmptyPrimaryName`) and flagging any
    /// explicitly `requested_lists` entry with zero surviving entries as
    /// `EmptyList`.
    pub fn build(entries: Vec<CorpusEntry>, requested_lists: &HashSet<String>) -> Self {
        let mut indexed = Vec::with_capacity(entries.len());
        let mut warnings = Vec::new();
        let mut present_lists: HashSet<String> = HashSet::new();

        for entry in entries {
            if !entry.active {
                continue;
            }
            if entry.validate().is_err() {
                warnings.push(ScreeningWarning::EmptyPrimaryName {
                    list_code: entry.list_code.clone(),
                    source_id: entry.source_id.clone(),
                });
                continue;
            }
            present_lists.insert(entry.list_code.clone());
            let normalized_primary = normalize(&entry.primary_name, true);
            let normalized_aliases = entry.aliases.iter().map(|a| normalize(a, true)).collect();
            indexed.push(IndexedEntry {
                entry: Arc::new(entry),
                normalized_primary,
                normalized_aliases,
            });
        }

        for requested in requested_lists {
            if !present_lists.contains(requested) {
                warnings.push(ScreeningWarning::EmptyList {
                    list_code: requested.clone(),
                });
            }
        }

        Self {
            entries: indexed,
            warnings,
        }
    }

    pub fn entries(&self) -> &[IndexedEntry] {
        &self.entries
    }

    pub fn warnings(&self) -> &[ScreeningWarning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screening_core::EntryKind;

    fn entry(source_id: &str, list_code: &str, primary_name: &str) -> CorpusEntry {
        CorpusEntry::new(source_id, list_code, "Test List", EntryKind::Individual, primary_name)
    }

    #[test]
    fn skips_entries_with_empty_primary_name_and_warns() {
        let view = CorpusView::build(vec![entry("1", "OFAC", "   ")], &HashSet::new());
        assert!(view.is_empty());
        assert_eq!(view.warnings().len(), 1);
        assert!(matches!(view.warnings()[0], ScreeningWarning::EmptyPrimaryName { .. }));
    }

    #[test]
    fn flags_requested_list_with_no_entries() {
        let mut requested = HashSet::new();
        requested.insert("UN".to_string());
        let view = CorpusView::build(vec![entry("1", "OFAC", "Jane Smith")], &requested);
        assert_eq!(view.entries().len(), 1);
        assert!(view
            .warnings()
            .iter()
            .any(|w| matches!(w, ScreeningWarning::EmptyList { list_code } if list_code == "UN")));
    }

    #[test]
    fn skips_inactive_entries() {
        let mut inactive = entry("1", "OFAC", "Jane Smith");
        inactive.active = false;
        let view = CorpusView::build(vec![inactive], &HashSet::new());
        assert!(view.is_empty());
    }
}
