//! # regis-store — Storage for REGIS
//!
//! The query layer reads through the [`Repository`] trait and never sees a
//! connection, a lock or a SQL string. Two implementations are provided:
//!
//! - [`MemoryRepository`] serves a validated [`Dataset`](regis_core::Dataset)
//!   snapshot from process memory. Used for development, tests and the
//!   offline CLI.
//! - [`PgRepository`] reads the PostgreSQL schema in `migrations/` through a
//!   shared `sqlx` pool.
//!
//! Both return rows in ascending id order, which is the storage order the
//! query surface exposes.

use std::collections::HashMap;

use async_trait::async_trait;
use regis_core::{ConflictEdge, ConflictKind, Requirement, RequirementId, RiskType};

pub mod error;
pub mod memory;
pub mod postgres;
pub mod snapshot;

pub use error::StoreError;
pub use memory::{MemoryRepository, Store};
pub use postgres::{import_dataset, init_pool, ImportReport, PgRepository};
pub use snapshot::{read_dataset, write_dataset};

/// Optional predicates applied when listing requirements.
///
/// Jurisdiction comparison is exact. Callers normalize empty filters with
/// [`regis_core::normalize_filter`] before building one of these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequirementFilter<'a> {
    /// Keep only requirements in this jurisdiction.
    pub jurisdiction: Option<&'a str>,
    /// Keep only requirements of this risk type.
    pub risk_type: Option<RiskType>,
}

impl<'a> RequirementFilter<'a> {
    /// Filter by jurisdiction only.
    pub fn jurisdiction(jurisdiction: Option<&'a str>) -> Self {
        Self {
            jurisdiction,
            risk_type: None,
        }
    }

    /// Also restrict to one risk type.
    pub fn with_risk_type(mut self, risk_type: RiskType) -> Self {
        self.risk_type = Some(risk_type);
        self
    }

    /// Whether a requirement passes every predicate.
    pub fn matches(&self, requirement: &Requirement) -> bool {
        requirement.matches_jurisdiction(self.jurisdiction)
            && self.risk_type.map_or(true, |r| requirement.risk_type == r)
    }
}

/// Read access to requirements and conflict records.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Requirements passing `filter`, in id order.
    async fn requirements(
        &self,
        filter: RequirementFilter<'_>,
    ) -> Result<Vec<Requirement>, StoreError>;

    /// One requirement by id, or `None` if it does not exist.
    async fn requirement(&self, id: RequirementId) -> Result<Option<Requirement>, StoreError>;

    /// Resolve many ids at once. Ids with no matching row are absent from
    /// the returned map.
    async fn requirements_by_ids(
        &self,
        ids: &[RequirementId],
    ) -> Result<HashMap<RequirementId, Requirement>, StoreError> {
        let mut found = HashMap::with_capacity(ids.len());
        for id in ids {
            if found.contains_key(id) {
                continue;
            }
            if let Some(req) = self.requirement(*id).await? {
                found.insert(*id, req);
            }
        }
        Ok(found)
    }

    /// Requirement counts per risk type, indexed by [`RiskType::index`].
    async fn risk_counts(
        &self,
        jurisdiction: Option<&str>,
    ) -> Result<[u64; RiskType::COUNT], StoreError> {
        let mut counts = [0u64; RiskType::COUNT];
        for req in self
            .requirements(RequirementFilter::jurisdiction(jurisdiction))
            .await?
        {
            counts[req.risk_type.index()] += 1;
        }
        Ok(counts)
    }

    /// Conflict records of one kind, optionally filtered by jurisdiction,
    /// in id order.
    async fn conflicts(
        &self,
        kind: ConflictKind,
        jurisdiction: Option<&str>,
    ) -> Result<Vec<ConflictEdge>, StoreError>;

    /// Number of conflict records of one kind passing the filter.
    async fn count_conflicts(
        &self,
        kind: ConflictKind,
        jurisdiction: Option<&str>,
    ) -> Result<u64, StoreError> {
        Ok(self.conflicts(kind, jurisdiction).await?.len() as u64)
    }

    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
