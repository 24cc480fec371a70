//! PostgreSQL repository.
//!
//! All SQL is runtime-checked (`sqlx::query_as`, not `sqlx::query!`) so the
//! crate builds without a live database. Each table has a private
//! `#[derive(sqlx::FromRow)]` row type mapped into the domain type.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use regis_core::{
    ConflictEdge, ConflictId, ConflictKind, ConflictPositions, Dataset, DocumentId, Requirement,
    RequirementId, RiskType,
};
use sqlx::postgres::{PgPool, PgPoolOptions};
use uuid::Uuid;

use crate::{Repository, RequirementFilter, StoreError};

/// Connect to PostgreSQL and apply embedded migrations.
///
/// Returns `None` if no URL is configured (in-memory mode).
/// Returns `Err` if the URL is set but the connection or migration fails.
pub async fn init_pool(database_url: Option<&str>) -> Result<Option<PgPool>, StoreError> {
    let Some(url) = database_url else {
        tracing::warn!("DATABASE_URL not set, serving the in-memory dataset");
        return Ok(None);
    };

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(5))
        .connect(url)
        .await?;

    tracing::info!("Connected to PostgreSQL");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(Some(pool))
}

/// [`Repository`] over a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    /// Wrap an initialised pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

const REQUIREMENT_COLUMNS: &str = "id, text, page, line, risk_type, jurisdiction, document_id";

fn explanation_column(kind: ConflictKind) -> &'static str {
    match kind {
        ConflictKind::Contradiction => "description",
        ConflictKind::Overlap => "reason",
    }
}

#[async_trait]
impl Repository for PgRepository {
    async fn requirements(
        &self,
        filter: RequirementFilter<'_>,
    ) -> Result<Vec<Requirement>, StoreError> {
        let rows = sqlx::query_as::<_, RequirementRow>(&format!(
            "SELECT {REQUIREMENT_COLUMNS} FROM requirements
             WHERE ($1::text IS NULL OR jurisdiction = $1)
               AND ($2::text IS NULL OR risk_type = $2)
             ORDER BY id"
        ))
        .bind(filter.jurisdiction)
        .bind(filter.risk_type.map(RiskType::as_str))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(RequirementRow::into_record).collect()
    }

    async fn requirement(&self, id: RequirementId) -> Result<Option<Requirement>, StoreError> {
        let row = sqlx::query_as::<_, RequirementRow>(&format!(
            "SELECT {REQUIREMENT_COLUMNS} FROM requirements WHERE id = $1"
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(RequirementRow::into_record).transpose()
    }

    async fn requirements_by_ids(
        &self,
        ids: &[RequirementId],
    ) -> Result<HashMap<RequirementId, Requirement>, StoreError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let raw: Vec<i64> = ids.iter().map(|id| id.get()).collect();
        let rows = sqlx::query_as::<_, RequirementRow>(&format!(
            "SELECT {REQUIREMENT_COLUMNS} FROM requirements WHERE id = ANY($1)"
        ))
        .bind(raw)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| row.into_record().map(|r| (r.id, r)))
            .collect()
    }

    async fn risk_counts(
        &self,
        jurisdiction: Option<&str>,
    ) -> Result<[u64; RiskType::COUNT], StoreError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT risk_type, COUNT(*) FROM requirements
             WHERE ($1::text IS NULL OR jurisdiction = $1)
             GROUP BY risk_type",
        )
        .bind(jurisdiction)
        .fetch_all(&self.pool)
        .await?;

        let mut counts = [0u64; RiskType::COUNT];
        for (risk_type, count) in rows {
            let risk: RiskType = risk_type.parse().map_err(|e: regis_core::ValidationError| {
                StoreError::Decode {
                    table: "requirements",
                    id: format!("risk_type={risk_type}"),
                    reason: e.to_string(),
                }
            })?;
            counts[risk.index()] = u64::try_from(count).unwrap_or(0);
        }
        Ok(counts)
    }

    async fn conflicts(
        &self,
        kind: ConflictKind,
        jurisdiction: Option<&str>,
    ) -> Result<Vec<ConflictEdge>, StoreError> {
        let rows = sqlx::query_as::<_, ConflictRow>(&format!(
            "SELECT id, requirement1_id, requirement2_id, {} AS explanation,
                    page_1, line_1, page_2, line_2, jurisdiction
             FROM {}
             WHERE ($1::text IS NULL OR jurisdiction = $1)
             ORDER BY id",
            explanation_column(kind),
            kind.table(),
        ))
        .bind(jurisdiction)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|row| row.into_edge(kind)).collect())
    }

    async fn count_conflicts(
        &self,
        kind: ConflictKind,
        jurisdiction: Option<&str>,
    ) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM {} WHERE ($1::text IS NULL OR jurisdiction = $1)",
            kind.table(),
        ))
        .bind(jurisdiction)
        .fetch_one(&self.pool)
        .await?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Row counts written by [`import_dataset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Documents inserted.
    pub documents: usize,
    /// Requirements inserted.
    pub requirements: usize,
    /// Contradictions inserted.
    pub contradictions: usize,
    /// Overlaps inserted.
    pub overlaps: usize,
    /// Embeddings inserted.
    pub embeddings: usize,
}

/// Replace every table with the contents of a dataset, in one transaction.
///
/// The dataset is validated first; nothing is written if it is invalid.
pub async fn import_dataset(pool: &PgPool, dataset: &Dataset) -> Result<ImportReport, StoreError> {
    dataset.validate()?;

    let mut tx = pool.begin().await?;

    for table in [
        "requirement_embeddings",
        "contradictions",
        "requirement_overlaps",
        "requirements",
        "documents",
    ] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&mut *tx)
            .await?;
    }

    for doc in &dataset.documents {
        sqlx::query(
            "INSERT INTO documents (id, file_path, title, jurisdiction, category_level,
             doc_type, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(doc.id.as_uuid())
        .bind(&doc.file_path)
        .bind(&doc.title)
        .bind(&doc.jurisdiction)
        .bind(doc.category_level.as_str())
        .bind(doc.doc_type.as_str())
        .bind(doc.created_at)
        .execute(&mut *tx)
        .await?;
    }

    for req in &dataset.requirements {
        sqlx::query(
            "INSERT INTO requirements (id, text, page, line, risk_type, jurisdiction, document_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(req.id.get())
        .bind(&req.text)
        .bind(req.page)
        .bind(req.line)
        .bind(req.risk_type.as_str())
        .bind(&req.jurisdiction)
        .bind(req.document_id.map(|d| d.0))
        .execute(&mut *tx)
        .await?;
    }

    let mut conflict_counts = [0usize; 2];
    for (slot, kind) in ConflictKind::all().iter().enumerate() {
        for edge in dataset.conflict_edges(*kind) {
            let p = edge.positions;
            sqlx::query(&format!(
                "INSERT INTO {} (id, requirement1_id, requirement2_id, {}, page_1, line_1,
                 page_2, line_2, jurisdiction)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
                kind.table(),
                explanation_column(*kind),
            ))
            .bind(edge.id.get())
            .bind(edge.requirement1_id.get())
            .bind(edge.requirement2_id.get())
            .bind(&edge.explanation)
            .bind(p.page_1)
            .bind(p.line_1)
            .bind(p.page_2)
            .bind(p.line_2)
            .bind(&edge.jurisdiction)
            .execute(&mut *tx)
            .await?;
            conflict_counts[slot] += 1;
        }
    }

    for emb in &dataset.embeddings {
        sqlx::query(
            "INSERT INTO requirement_embeddings (id, requirement_id, embedding)
             VALUES ($1, $2, $3)",
        )
        .bind(emb.id.0)
        .bind(emb.requirement_id.get())
        .bind(&emb.embedding)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    let report = ImportReport {
        documents: dataset.documents.len(),
        requirements: dataset.requirements.len(),
        contradictions: conflict_counts[0],
        overlaps: conflict_counts[1],
        embeddings: dataset.embeddings.len(),
    };
    tracing::info!(?report, "dataset imported");
    Ok(report)
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct RequirementRow {
    id: i64,
    text: String,
    page: Option<i32>,
    line: Option<i32>,
    risk_type: String,
    jurisdiction: String,
    document_id: Option<Uuid>,
}

impl RequirementRow {
    fn into_record(self) -> Result<Requirement, StoreError> {
        let risk_type = self.risk_type.parse().map_err(|e: regis_core::ValidationError| {
            StoreError::Decode {
                table: "requirements",
                id: self.id.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Requirement {
            id: RequirementId(self.id),
            text: self.text,
            page: self.page,
            line: self.line,
            risk_type,
            jurisdiction: self.jurisdiction,
            document_id: self.document_id.map(DocumentId),
        })
    }
}

/// Internal row type shared by both conflict tables.
#[derive(sqlx::FromRow)]
struct ConflictRow {
    id: i64,
    requirement1_id: i64,
    requirement2_id: i64,
    explanation: Option<String>,
    page_1: Option<i32>,
    line_1: Option<i32>,
    page_2: Option<i32>,
    line_2: Option<i32>,
    jurisdiction: Option<String>,
}

impl ConflictRow {
    fn into_edge(self, kind: ConflictKind) -> ConflictEdge {
        ConflictEdge {
            id: ConflictId(self.id),
            kind,
            requirement1_id: RequirementId(self.requirement1_id),
            requirement2_id: RequirementId(self.requirement2_id),
            explanation: self.explanation,
            positions: ConflictPositions {
                page_1: self.page_1,
                line_1: self.line_1,
                page_2: self.page_2,
                line_2: self.line_2,
            },
            jurisdiction: self.jurisdiction,
        }
    }
}
