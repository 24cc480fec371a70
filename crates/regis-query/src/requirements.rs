//! Requirement listing, lookup and sampling.

use rand::seq::SliceRandom;
use rand::Rng;
use regis_core::{normalize_filter, Requirement, RequirementId, SUGGESTED_SENTENCES};
use regis_store::{Repository, RequirementFilter};

use crate::error::QueryError;
use crate::responses::{RequirementDetail, RequirementListItem, RequirementListResponse};

/// Sample size used when the caller does not give one.
pub const DEFAULT_SAMPLE_LIMIT: usize = 5;

fn filler<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    SUGGESTED_SENTENCES[rng.gen_range(0..SUGGESTED_SENTENCES.len())]
}

fn into_list<R: Rng + ?Sized>(
    requirements: impl IntoIterator<Item = Requirement>,
    rng: &mut R,
) -> RequirementListResponse {
    let items: Vec<_> = requirements
        .into_iter()
        .map(|req| RequirementListItem::new(req, filler(rng)))
        .collect();
    RequirementListResponse {
        count: items.len(),
        items,
    }
}

/// All requirements in storage order, optionally restricted to one
/// jurisdiction.
pub async fn list_requirements<R: Rng + ?Sized>(
    repo: &dyn Repository,
    rng: &mut R,
    jurisdiction: Option<&str>,
) -> Result<RequirementListResponse, QueryError> {
    let jurisdiction = normalize_filter(jurisdiction);
    let requirements = repo
        .requirements(RequirementFilter::jurisdiction(jurisdiction))
        .await?;
    Ok(into_list(requirements, rng))
}

/// One requirement by id.
pub async fn get_requirement<R: Rng + ?Sized>(
    repo: &dyn Repository,
    rng: &mut R,
    id: RequirementId,
) -> Result<RequirementDetail, QueryError> {
    let req = repo
        .requirement(id)
        .await?
        .ok_or(QueryError::NotFound(id))?;
    Ok(RequirementDetail {
        id: req.id,
        text: req.text,
        risk_type: req.risk_type,
        jurisdiction: req.jurisdiction,
        page: req.page,
        line: req.line,
        description: filler(rng).to_string(),
    })
}

/// A uniform random sample without replacement of
/// `min(limit, matching requirements)` requirements.
pub async fn sample_requirements<R: Rng + ?Sized>(
    repo: &dyn Repository,
    rng: &mut R,
    limit: usize,
    jurisdiction: Option<&str>,
) -> Result<RequirementListResponse, QueryError> {
    let jurisdiction = normalize_filter(jurisdiction);
    let pool = repo
        .requirements(RequirementFilter::jurisdiction(jurisdiction))
        .await?;
    let picked: Vec<Requirement> = pool.choose_multiple(rng, limit).cloned().collect();
    Ok(into_list(picked, rng))
}
