//! # Summary Subcommand
//!
//! Loads a dataset file into the in-memory repository and prints the same
//! risk and conflict breakdowns the API serves.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use regis_query::{ConflictsSummaryResponse, RiskSummaryResponse};
use regis_store::MemoryRepository;

/// Arguments for the summary subcommand.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Dataset JSON file.
    pub dataset: PathBuf,

    /// Restrict both summaries to one jurisdiction.
    #[arg(long)]
    pub jurisdiction: Option<String>,

    /// Print the two responses as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Execute the summary subcommand.
pub async fn run_summary(args: &SummaryArgs) -> Result<u8> {
    let dataset = regis_store::read_dataset(&args.dataset)
        .with_context(|| format!("failed to load {}", args.dataset.display()))?;
    let repo = MemoryRepository::from_dataset(dataset).context("dataset is invalid")?;

    let jurisdiction = args.jurisdiction.as_deref();
    let risks = regis_query::risk_summary(&repo, jurisdiction).await?;
    let conflicts = regis_query::conflicts_summary(&repo, jurisdiction).await?;

    if args.json {
        let value = serde_json::json!({ "risks": risks, "conflicts": conflicts });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!("{}", render_table(&risks, &conflicts));
    }
    Ok(0)
}

/// Plain-text rendering of both summaries.
pub fn render_table(risks: &RiskSummaryResponse, conflicts: &ConflictsSummaryResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Requirements: {}", risks.total);
    for item in &risks.risks {
        let _ = writeln!(
            out,
            "  {:<14} {:>6} {:>7.2}%",
            item.risk_type.as_str(),
            item.count,
            item.percentage
        );
    }
    let _ = writeln!(out, "Conflicts: {}", conflicts.total);
    for item in &conflicts.items {
        let _ = writeln!(
            out,
            "  {:<14} {:>6} {:>7.2}%",
            item.conflict_type.as_str(),
            item.count,
            item.percentage
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use regis_core::{Dataset, Overlap, Requirement, RequirementId, RiskType};
    use regis_core::{ConflictId, ConflictPositions};

    fn dataset() -> Dataset {
        Dataset {
            requirements: vec![
                Requirement::new(RequirementId(1), "a", RiskType::Aml),
                Requirement::new(RequirementId(2), "b", RiskType::Aml),
                Requirement::new(RequirementId(3), "c", RiskType::Fraud).with_jurisdiction("EBA"),
            ],
            overlaps: vec![Overlap {
                id: ConflictId(1),
                requirement1_id: RequirementId(1),
                requirement2_id: RequirementId(2),
                reason: None,
                positions: ConflictPositions::default(),
                jurisdiction: Some("GLOBAL".to_string()),
            }],
            ..Dataset::default()
        }
    }

    #[tokio::test]
    async fn table_lists_non_empty_categories() {
        let repo = MemoryRepository::from_dataset(dataset()).unwrap();
        let risks = regis_query::risk_summary(&repo, None).await.unwrap();
        let conflicts = regis_query::conflicts_summary(&repo, None).await.unwrap();
        let table = render_table(&risks, &conflicts);
        assert!(table.starts_with("Requirements: 3\n"));
        assert!(table.contains("AML"));
        assert!(table.contains("66.67%"));
        assert!(table.contains("Conflicts: 1\n"));
        assert!(table.contains("contradiction"));
        assert!(table.contains("100.00%"));
        assert!(!table.contains("PRIVACY"));
    }

    #[tokio::test]
    async fn run_summary_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.json");
        regis_store::write_dataset(&path, &dataset()).unwrap();
        let args = SummaryArgs {
            dataset: path,
            jurisdiction: Some("EBA".to_string()),
            json: true,
        };
        assert_eq!(run_summary(&args).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn run_summary_missing_file_fails() {
        let args = SummaryArgs {
            dataset: PathBuf::from("/nonexistent/regis.json"),
            jurisdiction: None,
            json: false,
        };
        assert!(run_summary(&args).await.is_err());
    }
}
