//! Shared test data.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use regis_core::{
    ConflictEdge, ConflictId, ConflictKind, ConflictPositions, Contradiction, Dataset, Overlap,
    Requirement, RequirementId, RiskType,
};
use regis_store::{MemoryRepository, Repository, RequirementFilter, StoreError};

pub fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

pub fn requirement(id: i64, risk: RiskType, jurisdiction: &str) -> Requirement {
    Requirement::new(RequirementId(id), format!("Requirement text {id}."), risk)
        .with_jurisdiction(jurisdiction)
        .at(id as i32, 10 * id as i32)
}

fn contradiction(id: i64, a: i64, b: i64, jurisdiction: Option<&str>) -> Contradiction {
    Contradiction {
        id: ConflictId(id),
        requirement1_id: RequirementId(a),
        requirement2_id: RequirementId(b),
        description: Some(format!("contradiction {id}")),
        positions: ConflictPositions::default(),
        jurisdiction: jurisdiction.map(str::to_string),
    }
}

fn overlap(id: i64, a: i64, b: i64, jurisdiction: Option<&str>) -> Overlap {
    Overlap {
        id: ConflictId(id),
        requirement1_id: RequirementId(a),
        requirement2_id: RequirementId(b),
        reason: Some(format!("overlap {id}")),
        positions: ConflictPositions::default(),
        jurisdiction: jurisdiction.map(str::to_string),
    }
}

/// Six requirements over three jurisdictions, two contradictions and three
/// overlaps.
pub fn dataset() -> Dataset {
    Dataset {
        requirements: vec![
            requirement(1, RiskType::Aml, "EBA"),
            requirement(2, RiskType::Aml, "EBA"),
            requirement(3, RiskType::Fraud, "EBA"),
            requirement(4, RiskType::Privacy, "GLOBAL"),
            requirement(5, RiskType::Aml, "FinCEN"),
            requirement(6, RiskType::Cybersecurity, "FinCEN"),
        ],
        contradictions: vec![
            contradiction(1, 1, 3, Some("EBA")),
            contradiction(2, 5, 6, Some("FinCEN")),
        ],
        overlaps: vec![
            overlap(1, 1, 2, Some("EBA")),
            overlap(2, 4, 5, Some("GLOBAL")),
            overlap(3, 2, 3, None),
        ],
        ..Dataset::default()
    }
}

pub fn repo() -> MemoryRepository {
    MemoryRepository::from_dataset(dataset()).expect("fixture dataset is valid")
}

/// Repository whose every call fails, counting how often it was reached.
#[derive(Default)]
pub struct FailingRepository {
    pub calls: AtomicUsize,
}

impl FailingRepository {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail(&self) -> StoreError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        StoreError::Unavailable("connection refused".to_string())
    }
}

#[async_trait]
impl Repository for FailingRepository {
    async fn requirements(
        &self,
        _filter: RequirementFilter<'_>,
    ) -> Result<Vec<Requirement>, StoreError> {
        Err(self.fail())
    }

    async fn requirement(&self, _id: RequirementId) -> Result<Option<Requirement>, StoreError> {
        Err(self.fail())
    }

    async fn conflicts(
        &self,
        _kind: ConflictKind,
        _jurisdiction: Option<&str>,
    ) -> Result<Vec<ConflictEdge>, StoreError> {
        Err(self.fail())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(self.fail())
    }
}
