//! In-memory repository.
//!
//! Rows are held in [`Store`]s keyed by id. A `BTreeMap` keeps iteration in
//! ascending id order, matching the `ORDER BY id` of the PostgreSQL
//! repository.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use regis_core::{ConflictEdge, ConflictId, ConflictKind, Dataset, Requirement, RequirementId};

use crate::{Repository, RequirementFilter, StoreError};

/// Thread-safe, cloneable in-memory table.
///
/// The lock is `parking_lot` and never held across an `.await`.
#[derive(Debug)]
pub struct Store<K: Ord, T: Clone + Send + Sync> {
    data: Arc<RwLock<BTreeMap<K, T>>>,
}

impl<K: Ord, T: Clone + Send + Sync> Clone for Store<K, T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<K: Ord, T: Clone + Send + Sync> Store<K, T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Insert a record, returning the previous value if the key existed.
    pub fn insert(&self, id: K, value: T) -> Option<T> {
        self.data.write().insert(id, value)
    }

    /// Retrieve a record by id.
    pub fn get(&self, id: &K) -> Option<T> {
        self.data.read().get(id).cloned()
    }

    /// All records in key order.
    pub fn list(&self) -> Vec<T> {
        self.data.read().values().cloned().collect()
    }

    /// Records passing `pred`, in key order.
    pub fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.data
            .read()
            .values()
            .filter(|v| pred(v))
            .cloned()
            .collect()
    }

    /// Number of records passing `pred`.
    pub fn count(&self, pred: impl Fn(&T) -> bool) -> usize {
        self.data.read().values().filter(|v| pred(v)).count()
    }

    /// Remove a record by id.
    pub fn remove(&self, id: &K) -> Option<T> {
        self.data.write().remove(id)
    }

    /// Return the number of records.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Ord, T: Clone + Send + Sync> Default for Store<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// [`Repository`] over in-process tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    requirements: Store<RequirementId, Requirement>,
    contradictions: Store<ConflictId, ConflictEdge>,
    overlaps: Store<ConflictId, ConflictEdge>,
}

impl MemoryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a dataset and load its requirement and conflict tables.
    pub fn from_dataset(dataset: Dataset) -> Result<Self, StoreError> {
        dataset.validate()?;
        let repo = Self::new();
        for kind in ConflictKind::all() {
            for edge in dataset.conflict_edges(*kind) {
                repo.insert_conflict(edge);
            }
        }
        for req in dataset.requirements {
            repo.insert_requirement(req);
        }
        tracing::info!(
            requirements = repo.requirements.len(),
            contradictions = repo.contradictions.len(),
            overlaps = repo.overlaps.len(),
            "loaded in-memory dataset"
        );
        Ok(repo)
    }

    /// Insert or replace a requirement.
    pub fn insert_requirement(&self, requirement: Requirement) -> Option<Requirement> {
        self.requirements.insert(requirement.id, requirement)
    }

    /// Remove a requirement. Conflict records naming it are kept.
    pub fn remove_requirement(&self, id: RequirementId) -> Option<Requirement> {
        self.requirements.remove(&id)
    }

    /// Insert or replace a conflict record in the table for its kind.
    pub fn insert_conflict(&self, edge: ConflictEdge) -> Option<ConflictEdge> {
        self.table(edge.kind).insert(edge.id, edge)
    }

    fn table(&self, kind: ConflictKind) -> &Store<ConflictId, ConflictEdge> {
        match kind {
            ConflictKind::Contradiction => &self.contradictions,
            ConflictKind::Overlap => &self.overlaps,
        }
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn requirements(
        &self,
        filter: RequirementFilter<'_>,
    ) -> Result<Vec<Requirement>, StoreError> {
        Ok(self.requirements.filter(|r| filter.matches(r)))
    }

    async fn requirement(&self, id: RequirementId) -> Result<Option<Requirement>, StoreError> {
        Ok(self.requirements.get(&id))
    }

    async fn conflicts(
        &self,
        kind: ConflictKind,
        jurisdiction: Option<&str>,
    ) -> Result<Vec<ConflictEdge>, StoreError> {
        Ok(self
            .table(kind)
            .filter(|e| e.matches_jurisdiction(jurisdiction)))
    }

    async fn count_conflicts(
        &self,
        kind: ConflictKind,
        jurisdiction: Option<&str>,
    ) -> Result<u64, StoreError> {
        Ok(self
            .table(kind)
            .count(|e| e.matches_jurisdiction(jurisdiction)) as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
