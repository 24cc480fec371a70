//! # Source Documents
//!
//! A [`Document`] records a regulatory text that requirements were
//! extracted from. Documents own their requirements: removing a document
//! removes every requirement whose `document_id` points at it (see
//! [`Dataset::remove_document`](crate::Dataset::remove_document)).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::DocumentId;

/// Quality tier of a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryLevel {
    /// Authoritative primary source.
    Gold,
    /// Secondary guidance.
    Silver,
    /// Commentary or low-confidence material.
    Bronze,
}

impl CategoryLevel {
    /// The stored spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gold => "gold",
            Self::Silver => "silver",
            Self::Bronze => "bronze",
        }
    }

    /// Look up a level by its stored spelling.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "gold" => Some(Self::Gold),
            "silver" => Some(Self::Silver),
            "bronze" => Some(Self::Bronze),
            _ => None,
        }
    }
}

/// Legal nature of a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// EU legislation.
    EuLeg,
    /// Financial-sector regulation or supervisory guidance.
    FinancialRegulation,
    /// National statute.
    NationalLaw,
}

impl DocumentType {
    /// The stored spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EuLeg => "eu_leg",
            Self::FinancialRegulation => "financial_regulation",
            Self::NationalLaw => "national_law",
        }
    }

    /// Look up a type by its stored spelling.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "eu_leg" => Some(Self::EuLeg),
            "financial_regulation" => Some(Self::FinancialRegulation),
            "national_law" => Some(Self::NationalLaw),
            _ => None,
        }
    }
}

/// An ingested regulatory source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Row id.
    pub id: DocumentId,
    /// Location of the source file as seen by the ingestion pipeline.
    pub file_path: String,
    /// Human title, if known.
    #[serde(default)]
    pub title: Option<String>,
    /// Regulatory scope, if known.
    #[serde(default)]
    pub jurisdiction: Option<String>,
    /// Quality tier.
    pub category_level: CategoryLevel,
    /// Legal nature.
    pub doc_type: DocumentType,
    /// Ingestion timestamp.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_use_snake_case() {
        assert_eq!(
            serde_json::to_string(&DocumentType::FinancialRegulation).unwrap(),
            "\"financial_regulation\""
        );
        assert_eq!(serde_json::to_string(&CategoryLevel::Gold).unwrap(), "\"gold\"");
        for ty in [DocumentType::EuLeg, DocumentType::FinancialRegulation, DocumentType::NationalLaw] {
            assert_eq!(DocumentType::from_code(ty.as_str()), Some(ty));
        }
        assert_eq!(CategoryLevel::from_code("Gold"), None);
    }

    #[test]
    fn document_deserializes_without_optional_fields() {
        let json = r#"{
            "id": "5f0c9d1e-8a7b-4c3d-9e2f-1a2b3c4d5e6f",
            "file_path": "data/eba/gl-2021-05.pdf",
            "category_level": "silver",
            "doc_type": "financial_regulation",
            "created_at": "2024-03-01T09:30:00Z"
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.title, None);
        assert_eq!(doc.jurisdiction, None);
        assert_eq!(doc.category_level, CategoryLevel::Silver);
    }
}
