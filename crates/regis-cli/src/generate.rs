//! # Generate Subcommand
//!
//! Builds a synthetic dataset for demos and load tests: requirements with a
//! random risk type, position and jurisdiction, plus contradictions and
//! overlaps between distinct random pairs of them.
//!
//! ## Usage
//!
//! ```bash
//! # Default sizes (300 requirements, 40 contradictions, 60 overlaps):
//! regis generate --output dataset.json
//!
//! # Reproducible output:
//! regis generate --seed 42 --requirements 50 --output small.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use regis_core::{
    ConflictId, ConflictPositions, Contradiction, Dataset, Jurisdiction, Overlap, Requirement,
    RequirementId, RiskType,
};

/// Arguments for the generate subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Number of requirements.
    #[arg(long, default_value_t = 300)]
    pub requirements: usize,

    /// Number of contradictions.
    #[arg(long, default_value_t = 40)]
    pub contradictions: usize,

    /// Number of overlaps.
    #[arg(long, default_value_t = 60)]
    pub overlaps: usize,

    /// Seed for the random source. Omit for a different dataset each run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file.
    #[arg(long, short)]
    pub output: PathBuf,
}

/// Jurisdictions assigned to generated rows.
const GENERATED_JURISDICTIONS: [Jurisdiction; 8] = [
    Jurisdiction::Eba,
    Jurisdiction::Esma,
    Jurisdiction::Ecb,
    Jurisdiction::Basel,
    Jurisdiction::FinCen,
    Jurisdiction::Fsb,
    Jurisdiction::Global,
    Jurisdiction::UkFca,
];

/// Clauses appended to a base sentence.
const QUALIFIERS: [&str; 6] = [
    "in accordance with supervisory expectations.",
    "following best international practices.",
    "ensuring proportionality to the institution's size.",
    "subject to periodic review.",
    "with proper documentation retained.",
    "while maintaining adequate governance.",
];

const CONTRADICTION_DESCRIPTIONS: [&str; 5] = [
    "These requirements conflict based on incompatible obligations.",
    "One requirement mandates an action the other prohibits.",
    "The requirements set mutually exclusive deadlines.",
    "The requirements impose conflicting thresholds for the same activity.",
    "Complying with one requirement breaches the other.",
];

const OVERLAP_REASONS: [&str; 5] = [
    "These requirements overlap due to similar regulatory intent.",
    "Both requirements address the same control objective.",
    "The requirements impose duplicate reporting obligations.",
    "Both requirements cover the same customer due diligence step.",
    "The requirements share scope and differ only in wording.",
];

/// Base sentences for one risk type.
fn base_sentences(risk: RiskType) -> &'static [&'static str; 3] {
    match risk {
        RiskType::Aml => &[
            "Firms must implement risk-based AML controls.",
            "Enhanced due diligence is required for high-risk clients.",
            "Suspicious transactions must be monitored continuously.",
        ],
        RiskType::Fraud => &[
            "Institutions must maintain strong anti-fraud frameworks.",
            "Transaction anomalies must trigger fraud investigations.",
            "Employees must report indicators of fraudulent behavior.",
        ],
        RiskType::Cybersecurity => &[
            "Systems must include multi-factor authentication.",
            "Data encryption is mandatory for sensitive records.",
            "Organizations must maintain incident response plans.",
        ],
        RiskType::Governance => &[
            "Boards must ensure proper oversight of risk management.",
            "Senior management is accountable for internal controls.",
            "Compliance frameworks must be periodically reviewed.",
        ],
        RiskType::Privacy => &[
            "Personal data must be processed with explicit consent.",
            "Data subjects must be granted access and rectification rights.",
            "Firms must implement storage-limitation policies.",
        ],
        RiskType::Operational => &[
            "Critical operations must have resilience plans.",
            "Firms must document all internal processes.",
            "Incident logs must be recorded and reviewed regularly.",
        ],
        RiskType::Compliance => &[
            "Organizations must comply with all relevant legislation.",
            "Internal policies must be aligned with external regulations.",
            "Compliance reports must be filed regularly.",
        ],
        RiskType::Other => &[
            "General provisions must be considered when interpreting rules.",
            "Institutions must remain aware of cross-jurisdiction obligations.",
            "Requirements apply unless explicitly exempted.",
        ],
    }
}

/// Sizes of a generated dataset.
#[derive(Debug, Clone, Copy)]
pub struct DatasetShape {
    pub requirements: usize,
    pub contradictions: usize,
    pub overlaps: usize,
}

/// Execute the generate subcommand.
pub fn run_generate(args: &GenerateArgs) -> Result<u8> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let shape = DatasetShape {
        requirements: args.requirements,
        contradictions: args.contradictions,
        overlaps: args.overlaps,
    };

    let dataset = generate_dataset(shape, &mut rng)?;
    regis_store::write_dataset(&args.output, &dataset)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!(
        "Wrote {} requirements, {} contradictions, {} overlaps to {}",
        dataset.requirements.len(),
        dataset.contradictions.len(),
        dataset.overlaps.len(),
        args.output.display()
    );
    Ok(0)
}

/// Build a dataset of the given shape.
///
/// Fails when conflicts are requested but there are fewer than two
/// requirements to pair.
pub fn generate_dataset<R: Rng + ?Sized>(shape: DatasetShape, rng: &mut R) -> Result<Dataset> {
    if shape.requirements < 2 && shape.contradictions + shape.overlaps > 0 {
        anyhow::bail!(
            "conflicts need at least two requirements, got {}",
            shape.requirements
        );
    }

    let requirements: Vec<Requirement> = (1..=shape.requirements as i64)
        .map(|id| generate_requirement(RequirementId(id), rng))
        .collect();

    let contradictions = (1..=shape.contradictions as i64)
        .map(|id| {
            let (r1, r2, positions) = pick_pair(&requirements, rng)?;
            Ok(Contradiction {
                id: ConflictId(id),
                requirement1_id: r1.id,
                requirement2_id: r2.id,
                description: CONTRADICTION_DESCRIPTIONS
                    .choose(rng)
                    .map(|s| s.to_string()),
                positions,
                jurisdiction: Some(r1.jurisdiction.clone()),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let overlaps = (1..=shape.overlaps as i64)
        .map(|id| {
            let (r1, r2, positions) = pick_pair(&requirements, rng)?;
            Ok(Overlap {
                id: ConflictId(id),
                requirement1_id: r1.id,
                requirement2_id: r2.id,
                reason: OVERLAP_REASONS.choose(rng).map(|s| s.to_string()),
                positions,
                jurisdiction: Some(r1.jurisdiction.clone()),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        requirements = requirements.len(),
        contradictions = shape.contradictions,
        overlaps = shape.overlaps,
        "dataset generated"
    );

    let dataset = Dataset {
        requirements,
        contradictions,
        overlaps,
        ..Dataset::default()
    };
    dataset
        .validate()
        .context("generated dataset failed validation")?;
    Ok(dataset)
}

fn generate_requirement<R: Rng + ?Sized>(id: RequirementId, rng: &mut R) -> Requirement {
    let risk = RiskType::all()[rng.gen_range(0..RiskType::COUNT)];
    let base = base_sentences(risk)[rng.gen_range(0..3)];
    let qualifier = QUALIFIERS[rng.gen_range(0..QUALIFIERS.len())];
    let jurisdiction = GENERATED_JURISDICTIONS[rng.gen_range(0..GENERATED_JURISDICTIONS.len())];
    Requirement::new(id, format!("{base} {qualifier}"), risk)
        .at(rng.gen_range(1..=50), rng.gen_range(1..=500))
        .with_jurisdiction(jurisdiction.as_str())
}

/// Two distinct requirements and their echoed positions.
fn pick_pair<'a, R: Rng + ?Sized>(
    requirements: &'a [Requirement],
    rng: &mut R,
) -> Result<(&'a Requirement, &'a Requirement, ConflictPositions)> {
    let mut pair = requirements.choose_multiple(rng, 2);
    let (Some(r1), Some(r2)) = (pair.next(), pair.next()) else {
        anyhow::bail!("cannot pair fewer than two requirements");
    };
    let positions = ConflictPositions {
        page_1: r1.page,
        line_1: r1.line,
        page_2: r2.page,
        line_2: r2.line,
    };
    Ok((r1, r2, positions))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(requirements: usize, contradictions: usize, overlaps: usize) -> DatasetShape {
        DatasetShape {
            requirements,
            contradictions,
            overlaps,
        }
    }

    #[test]
    fn generates_requested_sizes() {
        let mut rng = StdRng::seed_from_u64(1);
        let dataset = generate_dataset(shape(300, 40, 60), &mut rng).unwrap();
        assert_eq!(dataset.requirements.len(), 300);
        assert_eq!(dataset.contradictions.len(), 40);
        assert_eq!(dataset.overlaps.len(), 60);
        assert!(dataset.documents.is_empty());
    }

    #[test]
    fn requirements_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(2);
        let dataset = generate_dataset(shape(200, 0, 0), &mut rng).unwrap();
        for req in &dataset.requirements {
            assert!((1..=50).contains(&req.page.unwrap()));
            assert!((1..=500).contains(&req.line.unwrap()));
            let jurisdiction = Jurisdiction::from_code(&req.jurisdiction).unwrap();
            assert!(!matches!(jurisdiction, Jurisdiction::Eu | Jurisdiction::Other));
            let base_matches = base_sentences(req.risk_type)
                .iter()
                .any(|base| req.text.starts_with(base));
            assert!(base_matches, "{}", req.text);
        }
    }

    #[test]
    fn conflicts_echo_their_requirements() {
        let mut rng = StdRng::seed_from_u64(3);
        let dataset = generate_dataset(shape(20, 15, 15), &mut rng).unwrap();
        for edge in dataset
            .contradictions
            .iter()
            .map(|c| regis_core::ConflictEdge::from(c.clone()))
            .chain(dataset.overlaps.iter().map(|o| regis_core::ConflictEdge::from(o.clone())))
        {
            assert_ne!(edge.requirement1_id, edge.requirement2_id);
            let r1 = &dataset.requirements[(edge.requirement1_id.get() - 1) as usize];
            let r2 = &dataset.requirements[(edge.requirement2_id.get() - 1) as usize];
            assert_eq!(edge.positions.page_1, r1.page);
            assert_eq!(edge.positions.line_2, r2.line);
            assert_eq!(edge.jurisdiction.as_deref(), Some(r1.jurisdiction.as_str()));
            assert!(edge.explanation.is_some());
        }
    }

    #[test]
    fn same_seed_same_dataset() {
        let a = generate_dataset(shape(30, 5, 5), &mut StdRng::seed_from_u64(9)).unwrap();
        let b = generate_dataset(shape(30, 5, 5), &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn conflicts_need_two_requirements() {
        let mut rng = StdRng::seed_from_u64(4);
        assert!(generate_dataset(shape(1, 1, 0), &mut rng).is_err());
        assert!(generate_dataset(shape(1, 0, 0), &mut rng).is_ok());
        assert!(generate_dataset(shape(0, 0, 0), &mut rng).is_ok());
    }

    #[test]
    fn run_generate_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("dataset.json");
        let args = GenerateArgs {
            requirements: 10,
            contradictions: 2,
            overlaps: 3,
            seed: Some(5),
            output: output.clone(),
        };
        assert_eq!(run_generate(&args).unwrap(), 0);
        let dataset = regis_store::read_dataset(&output).unwrap();
        assert_eq!(dataset.requirements.len(), 10);
        assert_eq!(dataset.overlaps.len(), 3);
    }
}
