//! Conflict summary and detail.
//!
//! Detail rows are joined to both referenced requirements through one batched
//! lookup. A row whose requirement no longer exists is left out of the
//! response and logged at `warn`; `count` always equals the number of items
//! returned.

use regis_core::{normalize_filter, ConflictBreakdown, ConflictKind};
use regis_store::Repository;

use crate::error::QueryError;
use crate::responses::{
    ConflictItem, ConflictSummaryItem, ConflictsDetailResponse, ConflictsSummaryResponse,
    RequirementRef,
};

/// Contradiction and overlap counts with their share of the total.
///
/// When both counts are zero the item list is empty.
pub async fn conflicts_summary(
    repo: &dyn Repository,
    jurisdiction: Option<&str>,
) -> Result<ConflictsSummaryResponse, QueryError> {
    let jurisdiction = normalize_filter(jurisdiction);
    let contradictions = repo
        .count_conflicts(ConflictKind::Contradiction, jurisdiction)
        .await?;
    let overlaps = repo.count_conflicts(ConflictKind::Overlap, jurisdiction).await?;
    let breakdown = ConflictBreakdown::new(contradictions, overlaps);
    Ok(ConflictsSummaryResponse {
        total: breakdown.total,
        items: breakdown
            .shares
            .into_iter()
            .map(|share| ConflictSummaryItem {
                conflict_type: share.key,
                count: share.count,
                percentage: share.percentage,
                description: share.key.description().to_string(),
            })
            .collect(),
    })
}

/// Every conflict record of one kind, with both requirements resolved.
///
/// `conflict_type` must be exactly `contradiction` or `overlap`; it is
/// checked before the repository is touched.
pub async fn conflicts_detail(
    repo: &dyn Repository,
    conflict_type: &str,
    jurisdiction: Option<&str>,
) -> Result<ConflictsDetailResponse, QueryError> {
    let kind: ConflictKind = conflict_type.parse()?;
    let edges = repo.conflicts(kind, normalize_filter(jurisdiction)).await?;

    let mut ids: Vec<_> = edges.iter().flat_map(|e| e.endpoints()).collect();
    ids.sort_unstable();
    ids.dedup();
    let resolved = repo.requirements_by_ids(&ids).await?;

    let mut items = Vec::with_capacity(edges.len());
    for edge in edges {
        let (Some(first), Some(second)) = (
            resolved.get(&edge.requirement1_id),
            resolved.get(&edge.requirement2_id),
        ) else {
            tracing::warn!(
                conflict_type = %kind,
                conflict_id = %edge.id,
                requirement1_id = %edge.requirement1_id,
                requirement2_id = %edge.requirement2_id,
                "skipping conflict with dangling requirement reference"
            );
            continue;
        };
        items.push(ConflictItem {
            id: edge.id,
            conflict_type: kind,
            jurisdiction: edge.jurisdiction,
            description: edge.explanation,
            requirement_1: RequirementRef::from(first.clone()),
            requirement_2: RequirementRef::from(second.clone()),
        });
    }

    Ok(ConflictsDetailResponse {
        count: items.len(),
        conflict_type: kind,
        items,
    })
}

#[cfg(test)]
mod tests {
    use regis_core::{RequirementId, ValidationError};
    use regis_store::MemoryRepository;

    use super::*;
    use crate::fixtures::{self, FailingRepository};

    #[tokio::test]
    async fn summary_counts_both_kinds() {
        let resp = conflicts_summary(&fixtures::repo(), None).await.unwrap();
        assert_eq!(resp.total, 5);
        assert_eq!(resp.items.len(), 2);
        assert_eq!(resp.items[0].conflict_type, ConflictKind::Contradiction);
        assert_eq!(resp.items[0].count, 2);
        assert_eq!(resp.items[0].percentage, 40.0);
        assert_eq!(resp.items[1].conflict_type, ConflictKind::Overlap);
        assert_eq!(resp.items[1].count, 3);
        assert_eq!(resp.items[1].percentage, 60.0);
        assert_eq!(resp.total, resp.items.iter().map(|i| i.count).sum::<u64>());
    }

    #[tokio::test]
    async fn summary_keeps_zero_kind_when_other_is_present() {
        let resp = conflicts_summary(&fixtures::repo(), Some("GLOBAL")).await.unwrap();
        assert_eq!(resp.total, 1);
        assert_eq!(resp.items.len(), 2);
        assert_eq!(resp.items[0].count, 0);
        assert_eq!(resp.items[0].percentage, 0.0);
        assert_eq!(resp.items[1].percentage, 100.0);
    }

    #[tokio::test]
    async fn summary_of_nothing_suppresses_both() {
        let resp = conflicts_summary(&MemoryRepository::new(), None).await.unwrap();
        assert_eq!(resp.total, 0);
        assert!(resp.items.is_empty());
    }

    #[tokio::test]
    async fn contradiction_detail_uses_description() {
        let resp = conflicts_detail(&fixtures::repo(), "contradiction", Some("EBA"))
            .await
            .unwrap();
        assert_eq!(resp.conflict_type, ConflictKind::Contradiction);
        assert_eq!(resp.count, 1);
        let item = &resp.items[0];
        assert_eq!(item.description.as_deref(), Some("contradiction 1"));
        assert_eq!(item.requirement_1.id, RequirementId(1));
        assert_eq!(item.requirement_2.id, RequirementId(3));
        assert_eq!(item.requirement_1.text, "Requirement text 1.");
        assert_eq!(item.requirement_2.page, Some(3));
    }

    #[tokio::test]
    async fn overlap_detail_uses_reason() {
        let resp = conflicts_detail(&fixtures::repo(), "overlap", None).await.unwrap();
        assert_eq!(resp.count, 3);
        assert_eq!(resp.items[0].description.as_deref(), Some("overlap 1"));
        assert_eq!(resp.items[2].jurisdiction, None);
    }

    #[tokio::test]
    async fn dangling_reference_is_skipped() {
        let repo = fixtures::repo();
        repo.remove_requirement(RequirementId(3));
        let resp = conflicts_detail(&repo, "overlap", None).await.unwrap();
        // overlap 3 links requirements 2 and 3
        assert_eq!(resp.count, 2);
        assert_eq!(resp.items.len(), 2);
        assert!(resp.items.iter().all(|i| i.id.get() != 3));

        // the summary still counts the stored row
        let summary = conflicts_summary(&repo, None).await.unwrap();
        assert_eq!(summary.items[1].count, 3);
    }

    #[tokio::test]
    async fn dangling_first_requirement_is_skipped() {
        let repo = fixtures::repo();
        repo.remove_requirement(RequirementId(1));

        // contradiction 1 and overlap 1 both start at requirement 1
        let contradictions = conflicts_detail(&repo, "contradiction", None).await.unwrap();
        assert_eq!(contradictions.count, 1);
        assert_eq!(contradictions.items.len(), 1);
        assert_eq!(contradictions.items[0].id.get(), 2);

        let overlaps = conflicts_detail(&repo, "overlap", Some("EBA")).await.unwrap();
        assert_eq!(overlaps.count, 0);
        assert!(overlaps.items.is_empty());
    }

    #[tokio::test]
    async fn invalid_conflict_type_fails_before_storage() {
        let repo = FailingRepository::default();
        for bad in ["bogus_type", "Overlap", ""] {
            let err = conflicts_detail(&repo, bad, None).await.unwrap_err();
            assert!(matches!(
                err,
                QueryError::Invalid(ValidationError::InvalidEnum { field: "conflict_type", .. })
            ));
        }
        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn detail_of_unknown_jurisdiction_is_empty() {
        let resp = conflicts_detail(&fixtures::repo(), "contradiction", Some("Atlantis"))
            .await
            .unwrap();
        assert_eq!(resp.count, 0);
        assert!(resp.items.is_empty());
    }

    #[tokio::test]
    async fn detail_serializes_type_key() {
        let resp = conflicts_detail(&fixtures::repo(), "overlap", Some("EBA"))
            .await
            .unwrap();
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["type"], "overlap");
        assert_eq!(json["count"], 1);
        assert_eq!(json["items"][0]["type"], "overlap");
        assert_eq!(json["items"][0]["requirement_1"]["jurisdiction"], "EBA");
        assert!(json["items"][0]["requirement_1"].get("risk_type").is_none());
    }
}
