//! # regis-query — Query Operations
//!
//! The read operations exposed by REGIS, written against
//! [`regis_store::Repository`] and returning serializable response shapes.
//!
//! | Operation | Function |
//! |-----------|----------|
//! | list requirements | [`list_requirements`] |
//! | requirement by id | [`get_requirement`] |
//! | random sample | [`sample_requirements`] |
//! | risk summary | [`risk_summary`] |
//! | risk detail | [`risk_detail`] |
//! | conflicts summary | [`conflicts_summary`] |
//! | conflicts detail | [`conflicts_detail`] |
//!
//! Every operation takes the raw `jurisdiction` filter and collapses an
//! empty string to "no filter". Enum path parameters are taken as `&str` and
//! parsed before any storage access, so an invalid value never costs a
//! round trip.
//!
//! Sampling and filler descriptions draw from a caller-supplied [`rand::Rng`];
//! seed it to make responses reproducible.

pub mod conflicts;
pub mod error;
pub mod requirements;
pub mod responses;
pub mod risks;

#[cfg(test)]
pub(crate) mod fixtures;

pub use conflicts::{conflicts_detail, conflicts_summary};
pub use error::QueryError;
pub use requirements::{get_requirement, list_requirements, sample_requirements, DEFAULT_SAMPLE_LIMIT};
pub use responses::{
    ConflictItem, ConflictSummaryItem, ConflictsDetailResponse, ConflictsSummaryResponse,
    RequirementDetail, RequirementListItem, RequirementListResponse, RequirementRef,
    RiskDetailResponse, RiskSummaryItem, RiskSummaryResponse,
};
pub use risks::{risk_detail, risk_summary};
