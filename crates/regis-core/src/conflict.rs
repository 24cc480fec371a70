//! # Conflict Records
//!
//! Contradictions and overlaps are edge records asserting a relationship
//! between two requirements. They are externally supplied facts: nothing in
//! REGIS computes them.
//!
//! Both kinds share one shape and differ only in the name of the
//! explanatory column (`description` for contradictions, `reason` for
//! overlaps). [`ConflictEdge`] is the kind-agnostic view the query layer
//! works with; the explanation is carried over from whichever column the
//! source kind defines.
//!
//! Requirement references are weak: an edge may outlive either of the
//! requirements it names.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::{ConflictId, RequirementId};
use crate::requirement::check_positive;

/// The two kinds of conflict record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Two requirements impose incompatible obligations.
    Contradiction,
    /// Two requirements are redundant or partially duplicate.
    Overlap,
}

/// Description of each conflict kind, in declaration order.
const CONFLICT_DESCRIPTIONS: [(ConflictKind, &str); 2] = [
    (
        ConflictKind::Contradiction,
        "Cases where two requirements conflict or impose opposing obligations.",
    ),
    (
        ConflictKind::Overlap,
        "Cases where two requirements are redundant or partially duplicate.",
    ),
];

impl ConflictKind {
    /// Both kinds in summary order.
    pub fn all() -> &'static [ConflictKind] {
        &[Self::Contradiction, Self::Overlap]
    }

    /// The wire spelling of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Contradiction => "contradiction",
            Self::Overlap => "overlap",
        }
    }

    /// Fixed human-readable description of this kind.
    pub fn description(self) -> &'static str {
        CONFLICT_DESCRIPTIONS[self as usize].1
    }

    /// Name of the storage table holding records of this kind.
    pub fn table(self) -> &'static str {
        match self {
            Self::Contradiction => "contradictions",
            Self::Overlap => "requirement_overlaps",
        }
    }
}

impl FromStr for ConflictKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contradiction" => Ok(Self::Contradiction),
            "overlap" => Ok(Self::Overlap),
            other => Err(ValidationError::InvalidEnum {
                field: "conflict_type",
                value: other.to_string(),
                expected: "contradiction, overlap".to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Positions of both requirements as recorded when the conflict was
/// authored. They may have drifted from the live requirement rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictPositions {
    /// Page of the first requirement.
    #[serde(default)]
    pub page_1: Option<i32>,
    /// Line of the first requirement.
    #[serde(default)]
    pub line_1: Option<i32>,
    /// Page of the second requirement.
    #[serde(default)]
    pub page_2: Option<i32>,
    /// Line of the second requirement.
    #[serde(default)]
    pub line_2: Option<i32>,
}

/// An asserted incompatibility between two requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contradiction {
    /// Row id.
    pub id: ConflictId,
    /// First requirement.
    pub requirement1_id: RequirementId,
    /// Second requirement.
    pub requirement2_id: RequirementId,
    /// Why the two requirements contradict.
    #[serde(default)]
    pub description: Option<String>,
    /// Authoring-time positions.
    #[serde(flatten)]
    pub positions: ConflictPositions,
    /// Regulatory scope of the record.
    #[serde(default)]
    pub jurisdiction: Option<String>,
}

/// An asserted redundancy between two requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlap {
    /// Row id.
    pub id: ConflictId,
    /// First requirement.
    pub requirement1_id: RequirementId,
    /// Second requirement.
    pub requirement2_id: RequirementId,
    /// Why the two requirements overlap.
    #[serde(default)]
    pub reason: Option<String>,
    /// Authoring-time positions.
    #[serde(flatten)]
    pub positions: ConflictPositions,
    /// Regulatory scope of the record.
    #[serde(default)]
    pub jurisdiction: Option<String>,
}

/// Kind-agnostic view of a contradiction or overlap row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictEdge {
    /// Row id within the kind's table.
    pub id: ConflictId,
    /// Which table the row came from.
    pub kind: ConflictKind,
    /// First requirement.
    pub requirement1_id: RequirementId,
    /// Second requirement.
    pub requirement2_id: RequirementId,
    /// `description` for contradictions, `reason` for overlaps.
    pub explanation: Option<String>,
    /// Authoring-time positions.
    pub positions: ConflictPositions,
    /// Regulatory scope of the record.
    pub jurisdiction: Option<String>,
}

impl ConflictEdge {
    /// Both referenced requirement ids, first then second.
    pub fn endpoints(&self) -> [RequirementId; 2] {
        [self.requirement1_id, self.requirement2_id]
    }

    /// Whether this record passes an optional jurisdiction filter.
    ///
    /// Records with no jurisdiction never match a concrete filter.
    pub fn matches_jurisdiction(&self, jurisdiction: Option<&str>) -> bool {
        match jurisdiction {
            None => true,
            Some(j) => self.jurisdiction.as_deref() == Some(j),
        }
    }

    /// Check the row-local invariants: distinct endpoints and positive
    /// positions.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let table = self.kind.table();
        if self.requirement1_id == self.requirement2_id {
            return Err(ValidationError::SelfReferentialConflict {
                table,
                id: self.id.get(),
                requirement_id: self.requirement1_id.get(),
            });
        }
        let id = self.id.to_string();
        let p = &self.positions;
        check_positive(table, &id, "page_1", p.page_1)?;
        check_positive(table, &id, "line_1", p.line_1)?;
        check_positive(table, &id, "page_2", p.page_2)?;
        check_positive(table, &id, "line_2", p.line_2)?;
        Ok(())
    }
}

impl From<Contradiction> for ConflictEdge {
    fn from(c: Contradiction) -> Self {
        Self {
            id: c.id,
            kind: ConflictKind::Contradiction,
            requirement1_id: c.requirement1_id,
            requirement2_id: c.requirement2_id,
            explanation: c.description,
            positions: c.positions,
            jurisdiction: c.jurisdiction,
        }
    }
}

impl From<Overlap> for ConflictEdge {
    fn from(o: Overlap) -> Self {
        Self {
            id: o.id,
            kind: ConflictKind::Overlap,
            requirement1_id: o.requirement1_id,
            requirement2_id: o.requirement2_id,
            explanation: o.reason,
            positions: o.positions,
            jurisdiction: o.jurisdiction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contradiction() -> Contradiction {
        Contradiction {
            id: ConflictId(1),
            requirement1_id: RequirementId(10),
            requirement2_id: RequirementId(20),
            description: Some("thresholds disagree".to_string()),
            positions: ConflictPositions {
                page_1: Some(3),
                line_1: Some(14),
                page_2: None,
                line_2: None,
            },
            jurisdiction: Some("EBA".to_string()),
        }
    }

    #[test]
    fn parse_accepts_exact_literals_only() {
        assert_eq!("contradiction".parse::<ConflictKind>().unwrap(), ConflictKind::Contradiction);
        assert_eq!("overlap".parse::<ConflictKind>().unwrap(), ConflictKind::Overlap);
        for bad in ["Overlap", "contradictions", "", "bogus_type"] {
            let err = bad.parse::<ConflictKind>().unwrap_err();
            assert!(err.to_string().contains("contradiction, overlap"), "{bad}: {err}");
        }
    }

    #[test]
    fn contradiction_edge_takes_description() {
        let edge = ConflictEdge::from(contradiction());
        assert_eq!(edge.kind, ConflictKind::Contradiction);
        assert_eq!(edge.explanation.as_deref(), Some("thresholds disagree"));
        assert_eq!(edge.endpoints(), [RequirementId(10), RequirementId(20)]);
    }

    #[test]
    fn overlap_edge_takes_reason() {
        let overlap = Overlap {
            id: ConflictId(1),
            requirement1_id: RequirementId(1),
            requirement2_id: RequirementId(2),
            reason: Some("same scope".to_string()),
            positions: ConflictPositions::default(),
            jurisdiction: None,
        };
        let edge = ConflictEdge::from(overlap);
        assert_eq!(edge.kind, ConflictKind::Overlap);
        assert_eq!(edge.explanation.as_deref(), Some("same scope"));
    }

    #[test]
    fn unscoped_record_never_matches_concrete_filter() {
        let mut c = contradiction();
        c.jurisdiction = None;
        let edge = ConflictEdge::from(c);
        assert!(edge.matches_jurisdiction(None));
        assert!(!edge.matches_jurisdiction(Some("EBA")));
    }

    #[test]
    fn self_reference_is_rejected() {
        let mut c = contradiction();
        c.requirement2_id = c.requirement1_id;
        let err = ConflictEdge::from(c).validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::SelfReferentialConflict {
                table: "contradictions",
                id: 1,
                requirement_id: 10,
            }
        );
    }

    #[test]
    fn positions_flatten_into_the_row() {
        let json = serde_json::to_value(contradiction()).unwrap();
        assert_eq!(json["page_1"], 3);
        assert_eq!(json["line_1"], 14);
        assert!(json.get("positions").is_none());
    }

    #[test]
    fn descriptions_follow_kind() {
        assert!(ConflictKind::Contradiction.description().contains("opposing"));
        assert!(ConflictKind::Overlap.description().contains("redundant"));
    }
}
