#![deny(missing_docs)]

//! # regis-core — Foundational Types for REGIS
//!
//! Defines the relational data model every other crate in the workspace
//! speaks: requirements, the contradiction and overlap edges between them,
//! the documents they were extracted from, and the fixed enumerations that
//! classify them. It depends on nothing internal.
//!
//! ## Design Principles
//!
//! 1. **Ids, not pointers.** Conflict records reference requirements through
//!    [`RequirementId`] only. Resolution happens through a repository at query
//!    time and always yields an `Option`, so a missing row is a value the
//!    caller must handle rather than a dereference that can fail.
//!
//! 2. **Closed enums with exhaustive tables.** [`RiskType`] and
//!    [`ConflictKind`] carry their description strings as immutable constant
//!    tables. Parsing is exact and case-sensitive; a rejected value reports
//!    the accepted set.
//!
//! 3. **Aggregation is pure.** [`RiskBreakdown`] and [`ConflictBreakdown`]
//!    compute counts and two-decimal percentages without touching storage,
//!    using integer arithmetic for the rounding step.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `regis-*` crates.
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.

pub mod aggregate;
pub mod conflict;
pub mod dataset;
pub mod document;
pub mod error;
pub mod identity;
pub mod jurisdiction;
pub mod requirement;
pub mod risk;

pub use aggregate::{percentage, ConflictBreakdown, RiskBreakdown, Share};
pub use conflict::{ConflictEdge, ConflictKind, ConflictPositions, Contradiction, Overlap};
pub use dataset::Dataset;
pub use document::{CategoryLevel, Document, DocumentType};
pub use error::ValidationError;
pub use identity::{ConflictId, DocumentId, EmbeddingId, RequirementId};
pub use jurisdiction::{normalize_filter, Jurisdiction, DEFAULT_JURISDICTION};
pub use requirement::{Requirement, RequirementEmbedding, SUGGESTED_SENTENCES};
pub use risk::RiskType;
