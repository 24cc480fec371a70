//! Response shapes.
//!
//! Optional fields serialize as `null` rather than being omitted, so every
//! key is always present in the JSON.

use regis_core::{ConflictKind, ConflictId, Requirement, RequirementId, RiskType};
use serde::Serialize;
use utoipa::ToSchema;

/// Requirement as listed by `/requirements/list` and `/requirements/suggested`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RequirementListItem {
    #[schema(value_type = i64)]
    pub id: RequirementId,
    pub text: String,
    #[schema(value_type = String, example = "AML")]
    pub risk_type: RiskType,
    pub jurisdiction: String,
    pub page: Option<i32>,
    pub line: Option<i32>,
    /// Filler sentence picked at random.
    pub short_description: String,
}

impl RequirementListItem {
    pub(crate) fn new(req: Requirement, short_description: &str) -> Self {
        Self {
            id: req.id,
            text: req.text,
            risk_type: req.risk_type,
            jurisdiction: req.jurisdiction,
            page: req.page,
            line: req.line,
            short_description: short_description.to_string(),
        }
    }
}

/// A list of requirements with its length.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RequirementListResponse {
    pub count: usize,
    pub items: Vec<RequirementListItem>,
}

/// One requirement by id.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RequirementDetail {
    #[schema(value_type = i64)]
    pub id: RequirementId,
    pub text: String,
    #[schema(value_type = String, example = "FRAUD")]
    pub risk_type: RiskType,
    pub jurisdiction: String,
    pub page: Option<i32>,
    pub line: Option<i32>,
    /// Filler sentence picked at random.
    pub description: String,
}

/// Compact requirement view used inside risk and conflict details.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RequirementRef {
    #[schema(value_type = i64)]
    pub id: RequirementId,
    pub text: String,
    pub page: Option<i32>,
    pub line: Option<i32>,
    pub jurisdiction: String,
}

impl From<Requirement> for RequirementRef {
    fn from(req: Requirement) -> Self {
        Self {
            id: req.id,
            text: req.text,
            page: req.page,
            line: req.line,
            jurisdiction: req.jurisdiction,
        }
    }
}

/// One non-empty risk category.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RiskSummaryItem {
    #[schema(value_type = String, example = "AML")]
    pub risk_type: RiskType,
    pub count: u64,
    #[schema(example = 33.33)]
    pub percentage: f64,
    pub description: String,
}

/// Requirement counts per risk category.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RiskSummaryResponse {
    pub total: u64,
    pub risks: Vec<RiskSummaryItem>,
}

/// Every requirement of one risk category.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RiskDetailResponse {
    #[schema(value_type = String, example = "CYBERSECURITY")]
    pub risk_type: RiskType,
    pub description: String,
    pub count: usize,
    pub items: Vec<RequirementRef>,
}

/// Count of one conflict kind.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ConflictSummaryItem {
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "contradiction")]
    pub conflict_type: ConflictKind,
    pub count: u64,
    pub percentage: f64,
    pub description: String,
}

/// Contradiction and overlap counts.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ConflictsSummaryResponse {
    pub total: u64,
    pub items: Vec<ConflictSummaryItem>,
}

/// A conflict record joined to both of its requirements.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ConflictItem {
    #[schema(value_type = i64)]
    pub id: ConflictId,
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "overlap")]
    pub conflict_type: ConflictKind,
    pub jurisdiction: Option<String>,
    /// `description` of a contradiction or `reason` of an overlap.
    pub description: Option<String>,
    pub requirement_1: RequirementRef,
    pub requirement_2: RequirementRef,
}

/// Every resolvable conflict record of one kind.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ConflictsDetailResponse {
    pub count: usize,
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "contradiction")]
    pub conflict_type: ConflictKind,
    pub items: Vec<ConflictItem>,
}
