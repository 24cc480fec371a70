//! Risk-category summary and detail.

use regis_core::{normalize_filter, RiskBreakdown, RiskType};
use regis_store::{Repository, RequirementFilter};

use crate::error::QueryError;
use crate::responses::{RequirementRef, RiskDetailResponse, RiskSummaryItem, RiskSummaryResponse};

/// Requirement counts and percentages per risk type. Categories with no
/// requirements are left out.
pub async fn risk_summary(
    repo: &dyn Repository,
    jurisdiction: Option<&str>,
) -> Result<RiskSummaryResponse, QueryError> {
    let counts = repo.risk_counts(normalize_filter(jurisdiction)).await?;
    let breakdown = RiskBreakdown::from_counts(counts);
    Ok(RiskSummaryResponse {
        total: breakdown.total,
        risks: breakdown
            .shares
            .into_iter()
            .map(|share| RiskSummaryItem {
                risk_type: share.key,
                count: share.count,
                percentage: share.percentage,
                description: share.key.description().to_string(),
            })
            .collect(),
    })
}

/// Every requirement of one risk type.
///
/// `risk_type` must be an exact upper-case member of [`RiskType`]; it is
/// checked before the repository is touched.
pub async fn risk_detail(
    repo: &dyn Repository,
    risk_type: &str,
    jurisdiction: Option<&str>,
) -> Result<RiskDetailResponse, QueryError> {
    let risk: RiskType = risk_type.parse()?;
    let filter = RequirementFilter::jurisdiction(normalize_filter(jurisdiction)).with_risk_type(risk);
    let items: Vec<RequirementRef> = repo
        .requirements(filter)
        .await?
        .into_iter()
        .map(RequirementRef::from)
        .collect();
    Ok(RiskDetailResponse {
        risk_type: risk,
        description: risk.description().to_string(),
        count: items.len(),
        items,
    })
}
