//! # Identifier Newtypes
//!
//! Newtype wrappers for the identifiers of each table. Requirement and
//! conflict ids are stable integers assigned at ingestion; documents are
//! keyed by UUID. You cannot pass a [`ConflictId`] where a
//! [`RequirementId`] is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique, stable identifier of a requirement row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequirementId(pub i64);

/// Identifier of a contradiction or overlap row.
///
/// Contradictions and overlaps live in separate tables, so two conflict
/// records of different kinds may share the same numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConflictId(pub i64);

/// Identifier of a requirement embedding row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmbeddingId(pub i64);

/// Identifier of an ingested source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub Uuid);

impl RequirementId {
    /// Access the raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl ConflictId {
    /// Access the raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl DocumentId {
    /// Generate a new random document identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequirementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for ConflictId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for EmbeddingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requirement_id_serializes_as_bare_integer() {
        let json = serde_json::to_string(&RequirementId(42)).unwrap();
        assert_eq!(json, "42");
        let back: RequirementId = serde_json::from_str("42").unwrap();
        assert_eq!(back, RequirementId(42));
    }

    #[test]
    fn document_ids_are_unique() {
        assert_ne!(DocumentId::new(), DocumentId::new());
    }

    #[test]
    fn requirement_ids_order_numerically() {
        let mut ids = vec![RequirementId(10), RequirementId(2), RequirementId(7)];
        ids.sort();
        assert_eq!(ids, vec![RequirementId(2), RequirementId(7), RequirementId(10)]);
    }
}
