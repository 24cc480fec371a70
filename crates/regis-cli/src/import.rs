//! # Import Subcommand
//!
//! Replaces the PostgreSQL contents with a dataset file. Migrations are
//! applied on connect; the dataset is validated before anything is deleted.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

/// Arguments for the import subcommand.
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Dataset JSON file.
    pub dataset: PathBuf,

    /// PostgreSQL connection string.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,
}

/// Execute the import subcommand.
pub async fn run_import(args: &ImportArgs) -> Result<u8> {
    let dataset = regis_store::read_dataset(&args.dataset)
        .with_context(|| format!("failed to load {}", args.dataset.display()))?;
    dataset.validate().context("dataset is invalid")?;

    let pool = regis_store::init_pool(Some(&args.database_url))
        .await
        .context("failed to connect to PostgreSQL")?
        .context("no database URL given")?;

    let report = regis_store::import_dataset(&pool, &dataset)
        .await
        .context("import failed")?;
    tracing::info!(?report, "import complete");

    println!(
        "Imported {} documents, {} requirements, {} contradictions, {} overlaps, {} embeddings",
        report.documents,
        report.requirements,
        report.contradictions,
        report.overlaps,
        report.embeddings
    );
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regis_core::{Dataset, Requirement, RequirementId, RiskType};

    #[tokio::test]
    async fn invalid_dataset_is_rejected_before_connecting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.json");
        let dataset = Dataset {
            requirements: vec![
                Requirement::new(RequirementId(1), "a", RiskType::Aml),
                Requirement::new(RequirementId(1), "b", RiskType::Fraud),
            ],
            ..Dataset::default()
        };
        regis_store::write_dataset(&path, &dataset).unwrap();

        let args = ImportArgs {
            dataset: path,
            database_url: "postgres://regis@127.0.0.1:1/regis".to_string(),
        };
        let err = run_import(&args).await.unwrap_err();
        assert!(format!("{err:#}").contains("dataset is invalid"));
    }
}
