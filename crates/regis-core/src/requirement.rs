//! # Requirements
//!
//! A [`Requirement`] is one obligation extracted from a regulatory text. It
//! is the hub of the data model: conflict records point at requirements by
//! id, and a requirement may point at the [`Document`](crate::Document) it
//! came from.
//!
//! Requirements are created by ingestion and never mutated by the query
//! surface.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::{DocumentId, EmbeddingId, RequirementId};
use crate::jurisdiction::DEFAULT_JURISDICTION;
use crate::risk::RiskType;

/// Filler sentences attached to requirement listings and detail views.
pub const SUGGESTED_SENTENCES: [&str; 5] = [
    "This regulation provides baseline compliance requirements.",
    "A standard obligation that applies across general business operations.",
    "Commonly referenced rule providing essential legal guidance.",
    "General compliance requirement applicable in most jurisdictions.",
    "A typical regulation that ensures baseline regulatory alignment.",
];

fn default_jurisdiction() -> String {
    DEFAULT_JURISDICTION.to_string()
}

/// One obligation extracted from a regulatory source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Unique, stable id.
    pub id: RequirementId,
    /// Obligation text. Never empty.
    pub text: String,
    /// Page within the source document, if known. Positive.
    #[serde(default)]
    pub page: Option<i32>,
    /// Line within the page, if known. Positive.
    #[serde(default)]
    pub line: Option<i32>,
    /// Subject-matter category.
    pub risk_type: RiskType,
    /// Regulatory scope; `"GLOBAL"` when ingestion did not specify one.
    #[serde(default = "default_jurisdiction")]
    pub jurisdiction: String,
    /// Source document, if the requirement was extracted from one.
    #[serde(default)]
    pub document_id: Option<DocumentId>,
}

impl Requirement {
    /// Create a requirement in the default jurisdiction with no position
    /// and no source document.
    pub fn new(id: RequirementId, text: impl Into<String>, risk_type: RiskType) -> Self {
        Self {
            id,
            text: text.into(),
            page: None,
            line: None,
            risk_type,
            jurisdiction: default_jurisdiction(),
            document_id: None,
        }
    }

    /// Set the regulatory scope.
    pub fn with_jurisdiction(mut self, jurisdiction: impl Into<String>) -> Self {
        self.jurisdiction = jurisdiction.into();
        self
    }

    /// Set the page/line position.
    pub fn at(mut self, page: i32, line: i32) -> Self {
        self.page = Some(page);
        self.line = Some(line);
        self
    }

    /// Attach the source document.
    pub fn in_document(mut self, document_id: DocumentId) -> Self {
        self.document_id = Some(document_id);
        self
    }

    /// Whether this requirement passes an optional jurisdiction filter.
    ///
    /// `None` matches everything; `Some(j)` requires exact equality.
    pub fn matches_jurisdiction(&self, jurisdiction: Option<&str>) -> bool {
        jurisdiction.map_or(true, |j| self.jurisdiction == j)
    }

    /// Check the row-local invariants: non-empty text, non-empty
    /// jurisdiction, positive page/line.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::EmptyText { id: self.id.get() });
        }
        if self.jurisdiction.is_empty() {
            return Err(ValidationError::EmptyJurisdiction { id: self.id.get() });
        }
        let id = self.id.to_string();
        check_positive("requirement", &id, "page", self.page)?;
        check_positive("requirement", &id, "line", self.line)?;
        Ok(())
    }
}

/// Serialized vector attached one-to-one to a requirement.
///
/// Kept as inert storage; nothing on the query surface reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementEmbedding {
    /// Row id.
    pub id: EmbeddingId,
    /// The requirement this vector describes.
    pub requirement_id: RequirementId,
    /// Vector encoded as a JSON array string.
    pub embedding: String,
}

pub(crate) fn check_positive(
    table: &'static str,
    id: &str,
    field: &'static str,
    value: Option<i32>,
) -> Result<(), ValidationError> {
    match value {
        Some(v) if v <= 0 => Err(ValidationError::NonPositivePosition {
            table,
            id: id.to_string(),
            field,
            value: v,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_jurisdiction_defaults_to_global() {
        let req: Requirement = serde_json::from_str(
            r#"{"id": 1, "text": "Firms must keep records.", "risk_type": "COMPLIANCE"}"#,
        )
        .unwrap();
        assert_eq!(req.jurisdiction, "GLOBAL");
        assert_eq!(req.page, None);
        assert_eq!(req.document_id, None);
    }

    #[test]
    fn jurisdiction_filter_is_exact_and_case_sensitive() {
        let req = Requirement::new(RequirementId(1), "x", RiskType::Aml).with_jurisdiction("EBA");
        assert!(req.matches_jurisdiction(None));
        assert!(req.matches_jurisdiction(Some("EBA")));
        assert!(!req.matches_jurisdiction(Some("eba")));
        assert!(!req.matches_jurisdiction(Some("EBA ")));
    }

    #[test]
    fn validate_rejects_blank_text() {
        let req = Requirement::new(RequirementId(3), "   ", RiskType::Other);
        assert_eq!(req.validate(), Err(ValidationError::EmptyText { id: 3 }));
    }

    #[test]
    fn validate_rejects_empty_jurisdiction() {
        let req = Requirement::new(RequirementId(4), "text", RiskType::Other).with_jurisdiction("");
        assert_eq!(req.validate(), Err(ValidationError::EmptyJurisdiction { id: 4 }));
    }

    #[test]
    fn validate_rejects_non_positive_positions() {
        let req = Requirement::new(RequirementId(5), "text", RiskType::Fraud).at(0, 3);
        assert!(matches!(
            req.validate(),
            Err(ValidationError::NonPositivePosition { field: "page", value: 0, .. })
        ));
        let req = Requirement::new(RequirementId(5), "text", RiskType::Fraud).at(2, -1);
        assert!(matches!(
            req.validate(),
            Err(ValidationError::NonPositivePosition { field: "line", value: -1, .. })
        ));
    }

    #[test]
    fn validate_accepts_well_formed_row() {
        let req = Requirement::new(RequirementId(6), "Boards must oversee risk.", RiskType::Governance)
            .with_jurisdiction("FSB")
            .at(12, 240);
        assert!(req.validate().is_ok());
    }
}
