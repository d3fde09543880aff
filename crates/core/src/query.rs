use serde::{Deserialize, Serialize};

use crate::error::ScreeningError;

/// Kind-specific fields for the entity being screened or listed. Keeping
/// `passport_number` on the individual arm and the registration fields on
/// the corporate arm means a corporate query can't accidentally carry a
/// passport number at the type level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityKind {
    Individual {
        #[serde(default)]
        passport_number: Option<String>,
    },
    Corporate {
        #[serde(default)]
        registration_number: Option<String>,
        #[serde(default)]
        registration_country: Option<String>,
    },
}

impl EntityKind {
    pub fn individual() -> Self {
        Self::Individual {
            passport_number: None,
        }
    }

    pub fn corporate() -> Self {
        Self::Corporate {
            registration_number: None,
            registration_country: None,
        }
    }

    pub fn is_corporate(&self) -> bool {
        matches!(self, Self::Corporate { .. })
    }
}

/// A small tag-only projection of `EntityKind` used on `ScreeningResponse`,
/// where only the coarse kind (not the kind-specific payload) is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKindTag {
    Individual,
    Corporate,
}

impl From<&EntityKind> for EntityKindTag {
    fn from(kind: &EntityKind) -> Self {
        match kind {
            EntityKind::Individual { .. } => Self::Individual,
            EntityKind::Corporate { .. } => Self::Corporate,
        }
    }
}

/// The entity being checked against the corpus. Constructed once per
/// request and never mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningQuery {
    pub display_name: String,
    pub entity_kind: EntityKind,
    pub date_of_birth: Option<String>,
    pub nationality: Option<String>,
    pub national_id: Option<String>,
    /// Caller-supplied context, propagated but never read by the core.
    pub context: Option<String>,
}

impl ScreeningQuery {
    pub fn new(display_name: impl Into<String>, entity_kind: EntityKind) -> Result<Self, ScreeningError> {
        let query = Self {
            display_name: display_name.into(),
            entity_kind,
            date_of_birth: None,
            nationality: None,
            national_id: None,
            context: None,
        };
        query.validate()?;
        Ok(query)
    }

    pub fn with_date_of_birth(mut self, date_of_birth: impl Into<String>) -> Self {
        self.date_of_birth = Some(date_of_birth.into());
        self
    }

    pub fn with_nationality(mut self, nationality: impl Into<String>) -> Self {
        self.nationality = Some(nationality.into());
        self
    }

    pub fn with_national_id(mut self, national_id: impl Into<String>) -> Self {
        self.national_id = Some(national_id.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// display name non-empty after trim, 2-500 chars, per spec.md S3.
    pub fn validate(&self) -> Result<(), ScreeningError> {
        let trimmed = self.display_name.trim();
        if trimmed.is_empty() {
            return Err(ScreeningError::InvalidQuery(
                "display_name is empty after trim".to_string(),
            ));
        }
        let len = trimmed.chars().count();
        if len < 2 || len > 500 {
            return Err(ScreeningError::InvalidQuery(format!(
                "display_name must be 2-500 chars after trim, got {len}"
            )));
        }
        Ok(())
    }

    pub fn passport_number(&self) -> Option<&str> {
        match &self.entity_kind {
            EntityKind::Individual { passport_number } => passport_number.as_deref(),
            EntityKind::Corporate { .. } => None,
        }
    }

    pub fn registration_number(&self) -> Option<&str> {
        match &self.entity_kind {
            EntityKind::Corporate {
                registration_number, ..
            } => registration_number.as_deref(),
            EntityKind::Individual { .. } => None,
        }
    }

    pub fn registration_country(&self) -> Option<&str> {
        match &self.entity_kind {
            EntityKind::Corporate {
                registration_country,
                ..
            } => registration_country.as_deref(),
            EntityKind::Individual { .. } => None,
        }
    }

    /// The identifier used for the augmented scorer's identifier boost:
    /// national id if present, otherwise passport number (individuals only).
    pub fn identifier_for_boost(&self) -> Option<&str> {
        self.national_id
            .as_deref()
            .or_else(|| self.passport_number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_display_name() {
        let err = ScreeningQuery::new("  ", EntityKind::individual()).unwrap_err();
        assert!(matches!(err, ScreeningError::InvalidQuery(_)));
    }

    #[test]
    fn rejects_single_char_display_name() {
        let err = ScreeningQuery::new("A", EntityKind::individual()).unwrap_err();
        assert!(matches!(err, ScreeningError::InvalidQuery(_)));
    }

    #[test]
    fn rejects_overlong_display_name() {
        let long = "a".repeat(501);
        let err = ScreeningQuery::new(long, EntityKind::individual()).unwrap_err();
        assert!(matches!(err, ScreeningError::InvalidQuery(_)));
    }

    #[test]
    fn identifier_prefers_national_id_over_passport() {
        let query = ScreeningQuery::new(
            "Jane Doe",
            EntityKind::Individual {
                passport_number: Some("P123".to_string()),
            },
        )
        .unwrap()
        .with_national_id("N999");
        assert_eq!(query.identifier_for_boost(), Some("N999"));
    }

    #[test]
    fn identifier_falls_back_to_passport() {
        let query = ScreeningQuery::new(
            "Jane Doe",
            EntityKind::Individual {
                passport_number: Some("P123".to_string()),
            },
        )
        .unwrap();
        assert_eq!(query.identifier_for_boost(), Some("P123"));
    }
}
