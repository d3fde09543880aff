use serde::{Deserialize, Serialize};

/// Non-fatal issues surfaced alongside a `ScreeningResponse` instead of
/// failing the screen outright (spec.md S7's downgrade rules).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScreeningWarning {
    /// An entry was dropped from the view at build time because its
    /// primary name was empty after trim.
    EmptyPrimaryName { list_code: String, source_id: String },
    /// A list code the caller explicitly requested has no active entries.
    EmptyList { list_code: String },
    /// A batch query failed outright; the accompanying response has zero
    /// matches rather than a partial score.
    QueryFailed { reference_id: String, reason: String },
}
