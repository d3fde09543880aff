use serde::{Deserialize, Serialize};

use crate::error::ScreeningError;
use crate::query::EntityKindTag;

/// Kind-specific fields for a corpus entry. Registration fields only exist
/// on the corporate arm, mirroring `EntityKind` on the query side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryKind {
    Individual,
    Corporate {
        #[serde(default)]
        registration_number: Option<String>,
        #[serde(default)]
        registration_country: Option<String>,
    },
}

impl EntryKind {
    pub fn tag(&self) -> EntityKindTag {
        match self {
            Self::Individual => EntityKindTag::Individual,
            Self::Corporate { .. } => EntityKindTag::Corporate,
        }
    }
}

/// A raw entry on a sanctions or watchlist, as supplied by the corpus
/// loader. Normalized/fingerprinted fields are cached separately, on the
/// `IndexedEntry` a `CorpusView` builds from these — the corpus loader
/// interface never needs to know about the normalizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusEntry {
    pub source_id: String,
    pub list_code: String,
    pub list_name: String,
    pub kind: EntryKind,
    pub primary_name: String,
    pub aliases: Vec<String>,
    pub date_of_birth: Option<String>,
    pub nationality: Option<String>,
    pub national_id: Option<String>,
    pub sanction_date: Option<String>,
    pub sanction_programs: Vec<String>,
    pub sanction_reason: Option<String>,
    pub active: bool,
}

impl CorpusEntry {
    pub fn new(
        source_id: impl Into<String>,
        list_code: impl Into<String>,
        list_name: impl Into<String>,
        kind: EntryKind,
        primary_name: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            list_code: list_code.into(),
            list_name: list_name.into(),
            kind,
            primary_name: primary_name.into(),
            aliases: Vec::new(),
            date_of_birth: None,
            nationality: None,
            national_id: None,
            sanction_date: None,
            sanction_programs: Vec::new(),
            sanction_reason: None,
            active: true,
        }
    }

    /// primary name must be non-empty after trim; a violation downgrades
    /// to a skipped entry recorded on the response's warnings channel
    /// rather than failing the whole screen (spec.md S7).
    pub fn validate(&self) -> Result<(), ScreeningError> {
        if self.primary_name.trim().is_empty() {
            return Err(ScreeningError::CorpusError(format!(
                "entry {} on list {} has an empty primary name",
                self.source_id, self.list_code
            )));
        }
        Ok(())
    }

    pub fn registration_number(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::Corporate {
                registration_number,
                ..
            } => registration_number.as_deref(),
            EntryKind::Individual => None,
        }
    }

    pub fn registration_country(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::Corporate {
                registration_country,
                ..
            } => registration_country.as_deref(),
            EntryKind::Individual => None,
        }
    }
}
