//! # Dataset Snapshots
//!
//! A [`Dataset`] is a complete, self-contained copy of every table. It is
//! the interchange format between the generator, the in-memory repository
//! and the PostgreSQL importer, serialized as a single JSON object.
//!
//! [`Dataset::validate`] enforces the integrity rules a storage engine
//! would: unique ids, row-local invariants, strong references from
//! requirements to documents and from embeddings to requirements. Conflict
//! records are checked for self-reference but not for existence of their
//! endpoints, which are weak references.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::conflict::{ConflictEdge, ConflictKind, Contradiction, Overlap};
use crate::document::Document;
use crate::error::ValidationError;
use crate::identity::DocumentId;
use crate::requirement::{Requirement, RequirementEmbedding};

/// Every table of the data model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Source documents.
    #[serde(default)]
    pub documents: Vec<Document>,
    /// Extracted requirements.
    #[serde(default)]
    pub requirements: Vec<Requirement>,
    /// Contradiction records.
    #[serde(default)]
    pub contradictions: Vec<Contradiction>,
    /// Overlap records.
    #[serde(default)]
    pub overlaps: Vec<Overlap>,
    /// Requirement embeddings.
    #[serde(default)]
    pub embeddings: Vec<RequirementEmbedding>,
}

impl Dataset {
    /// Conflict records of one kind as kind-agnostic edges.
    pub fn conflict_edges(&self, kind: ConflictKind) -> Vec<ConflictEdge> {
        match kind {
            ConflictKind::Contradiction => self
                .contradictions
                .iter()
                .cloned()
                .map(ConflictEdge::from)
                .collect(),
            ConflictKind::Overlap => self.overlaps.iter().cloned().map(ConflictEdge::from).collect(),
        }
    }

    /// Check every integrity rule. Returns the first violation found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut documents = HashSet::new();
        for doc in &self.documents {
            if !documents.insert(doc.id) {
                return Err(ValidationError::DuplicateId {
                    table: "documents",
                    id: doc.id.to_string(),
                });
            }
        }

        let mut requirements = HashSet::new();
        for req in &self.requirements {
            if !requirements.insert(req.id) {
                return Err(ValidationError::DuplicateId {
                    table: "requirements",
                    id: req.id.to_string(),
                });
            }
            req.validate()?;
            if let Some(document_id) = req.document_id {
                if !documents.contains(&document_id) {
                    return Err(ValidationError::UnknownDocument {
                        id: req.id.get(),
                        document_id: document_id.to_string(),
                    });
                }
            }
        }

        for kind in ConflictKind::all() {
            let mut seen = HashSet::new();
            for edge in self.conflict_edges(*kind) {
                if !seen.insert(edge.id) {
                    return Err(ValidationError::DuplicateId {
                        table: kind.table(),
                        id: edge.id.to_string(),
                    });
                }
                edge.validate()?;
            }
        }

        let mut embedding_ids = HashSet::new();
        let mut embedded = HashSet::new();
        for emb in &self.embeddings {
            if !embedding_ids.insert(emb.id) {
                return Err(ValidationError::DuplicateId {
                    table: "requirement_embeddings",
                    id: emb.id.to_string(),
                });
            }
            if !requirements.contains(&emb.requirement_id) {
                return Err(ValidationError::UnknownRequirement {
                    table: "requirement_embeddings",
                    id: emb.id.to_string(),
                    requirement_id: emb.requirement_id.get(),
                });
            }
            if !embedded.insert(emb.requirement_id) {
                return Err(ValidationError::DuplicateEmbedding {
                    requirement_id: emb.requirement_id.get(),
                });
            }
        }

        Ok(())
    }

    /// Delete a document together with the requirements it owns and their
    /// embeddings. Conflict records are left in place.
    ///
    /// Returns the number of requirements removed, or `None` if no such
    /// document exists.
    pub fn remove_document(&mut self, id: DocumentId) -> Option<usize> {
        let before = self.documents.len();
        self.documents.retain(|d| d.id != id);
        if self.documents.len() == before {
            return None;
        }

        let removed: HashSet<_> = self
            .requirements
            .iter()
            .filter(|r| r.document_id == Some(id))
            .map(|r| r.id)
            .collect();
        self.requirements.retain(|r| !removed.contains(&r.id));
        self.embeddings.retain(|e| !removed.contains(&e.requirement_id));
        Some(removed.len())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::conflict::ConflictPositions;
    use crate::document::{CategoryLevel, DocumentType};
    use crate::identity::{ConflictId, EmbeddingId, RequirementId};
    use crate::risk::RiskType;

    fn document() -> Document {
        Document {
            id: DocumentId::new(),
            file_path: "data/fincen/aml-2020.pdf".to_string(),
            title: Some("AML programme rule".to_string()),
            jurisdiction: Some("FinCEN".to_string()),
            category_level: CategoryLevel::Gold,
            doc_type: DocumentType::FinancialRegulation,
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
        }
    }

    fn overlap(id: i64, a: i64, b: i64) -> Overlap {
        Overlap {
            id: ConflictId(id),
            requirement1_id: RequirementId(a),
            requirement2_id: RequirementId(b),
            reason: None,
            positions: ConflictPositions::default(),
            jurisdiction: None,
        }
    }

    fn sample() -> (Dataset, DocumentId) {
        let doc = document();
        let doc_id = doc.id;
        let ds = Dataset {
            documents: vec![doc],
            requirements: vec![
                Requirement::new(RequirementId(1), "Report suspicious activity.", RiskType::Aml)
                    .in_document(doc_id),
                Requirement::new(RequirementId(2), "Encrypt data at rest.", RiskType::Cybersecurity),
            ],
            contradictions: vec![],
            overlaps: vec![overlap(1, 1, 2)],
            embeddings: vec![RequirementEmbedding {
                id: EmbeddingId(1),
                requirement_id: RequirementId(1),
                embedding: "[0.1, 0.2]".to_string(),
            }],
        };
        (ds, doc_id)
    }

    #[test]
    fn well_formed_dataset_validates() {
        let (ds, _) = sample();
        assert!(ds.validate().is_ok());
    }

    #[test]
    fn dangling_conflict_endpoint_is_accepted() {
        let (mut ds, _) = sample();
        ds.overlaps.push(overlap(2, 1, 999));
        assert!(ds.validate().is_ok());
    }

    #[test]
    fn duplicate_requirement_id_is_rejected() {
        let (mut ds, _) = sample();
        ds.requirements
            .push(Requirement::new(RequirementId(2), "Dup.", RiskType::Other));
        assert_eq!(
            ds.validate(),
            Err(ValidationError::DuplicateId {
                table: "requirements",
                id: "2".to_string()
            })
        );
    }

    #[test]
    fn same_id_in_both_conflict_tables_is_fine() {
        let (mut ds, _) = sample();
        ds.contradictions.push(Contradiction {
            id: ConflictId(1),
            requirement1_id: RequirementId(2),
            requirement2_id: RequirementId(1),
            description: None,
            positions: ConflictPositions::default(),
            jurisdiction: None,
        });
        assert!(ds.validate().is_ok());
    }

    #[test]
    fn self_referential_overlap_is_rejected() {
        let (mut ds, _) = sample();
        ds.overlaps.push(overlap(2, 2, 2));
        assert!(matches!(
            ds.validate(),
            Err(ValidationError::SelfReferentialConflict { table: "requirement_overlaps", .. })
        ));
    }

    #[test]
    fn unknown_document_is_rejected() {
        let (mut ds, _) = sample();
        ds.requirements[1].document_id = Some(DocumentId::new());
        assert!(matches!(ds.validate(), Err(ValidationError::UnknownDocument { id: 2, .. })));
    }

    #[test]
    fn second_embedding_for_a_requirement_is_rejected() {
        let (mut ds, _) = sample();
        ds.embeddings.push(RequirementEmbedding {
            id: EmbeddingId(2),
            requirement_id: RequirementId(1),
            embedding: "[]".to_string(),
        });
        assert_eq!(
            ds.validate(),
            Err(ValidationError::DuplicateEmbedding { requirement_id: 1 })
        );
    }

    #[test]
    fn embedding_for_missing_requirement_is_rejected() {
        let (mut ds, _) = sample();
        ds.embeddings[0].requirement_id = RequirementId(77);
        assert!(matches!(
            ds.validate(),
            Err(ValidationError::UnknownRequirement { requirement_id: 77, .. })
        ));
    }

    #[test]
    fn removing_a_document_cascades_but_keeps_conflicts() {
        let (mut ds, doc_id) = sample();
        assert_eq!(ds.remove_document(doc_id), Some(1));
        assert!(ds.documents.is_empty());
        assert_eq!(ds.requirements.len(), 1);
        assert_eq!(ds.requirements[0].id, RequirementId(2));
        assert!(ds.embeddings.is_empty());
        assert_eq!(ds.overlaps.len(), 1);
        assert!(ds.validate().is_ok());
    }

    #[test]
    fn removing_an_unknown_document_is_a_no_op() {
        let (mut ds, _) = sample();
        assert_eq!(ds.remove_document(DocumentId::new()), None);
        assert_eq!(ds.requirements.len(), 2);
    }

    #[test]
    fn missing_tables_default_to_empty() {
        let ds: Dataset = serde_json::from_str("{}").unwrap();
        assert_eq!(ds, Dataset::default());
    }
}
