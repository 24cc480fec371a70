//! # Risk Types — Single Source of Truth
//!
//! Defines the [`RiskType`] enum with all 8 categories used to classify a
//! requirement's subject matter, together with the fixed description table
//! surfaced by the risk summary and detail operations.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The subject-matter category of a requirement.
///
/// Every requirement carries exactly one risk type. Serialized and parsed
/// in upper case (`"AML"`, `"CYBERSECURITY"`); parsing is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskType {
    /// Anti-money laundering (suspicious transactions, weak controls).
    Aml,
    /// Fraud (misrepresentation, intentional deception).
    Fraud,
    /// Cybersecurity (breaches, unauthorized access).
    Cybersecurity,
    /// Governance (oversight, internal controls).
    Governance,
    /// Privacy (personal data handling).
    Privacy,
    /// Operational (process failures, human error).
    Operational,
    /// Compliance (regulatory violations).
    Compliance,
    /// Anything not covered above.
    Other,
}

/// Description of each risk type, in declaration order.
const RISK_DESCRIPTIONS: [(RiskType, &str); RiskType::COUNT] = [
    (
        RiskType::Aml,
        "Anti-Money Laundering risks related to suspicious transactions and weak controls.",
    ),
    (
        RiskType::Fraud,
        "Fraud risk related to misrepresentation or intentional deception.",
    ),
    (
        RiskType::Cybersecurity,
        "Cybersecurity risks like breaches or unauthorized access.",
    ),
    (
        RiskType::Governance,
        "Governance risks related to oversight and internal controls.",
    ),
    (
        RiskType::Privacy,
        "Privacy risks related to GDPR and misuse of personal data.",
    ),
    (
        RiskType::Operational,
        "Operational risks from process failures or human errors.",
    ),
    (
        RiskType::Compliance,
        "Compliance risks from regulatory violations.",
    ),
    (
        RiskType::Other,
        "Miscellaneous category for uncategorized risks.",
    ),
];

impl RiskType {
    /// The total number of risk types.
    pub const COUNT: usize = 8;

    /// All risk types in declaration order.
    ///
    /// Summaries list categories in this order.
    pub fn all() -> &'static [RiskType] {
        &[
            Self::Aml,
            Self::Fraud,
            Self::Cybersecurity,
            Self::Governance,
            Self::Privacy,
            Self::Operational,
            Self::Compliance,
            Self::Other,
        ]
    }

    /// Position of this risk type in [`RiskType::all`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// The wire and storage spelling of this risk type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aml => "AML",
            Self::Fraud => "FRAUD",
            Self::Cybersecurity => "CYBERSECURITY",
            Self::Governance => "GOVERNANCE",
            Self::Privacy => "PRIVACY",
            Self::Operational => "OPERATIONAL",
            Self::Compliance => "COMPLIANCE",
            Self::Other => "OTHER",
        }
    }

    /// Fixed human-readable description of this risk type.
    pub fn description(self) -> &'static str {
        RISK_DESCRIPTIONS[self.index()].1
    }

    /// Comma-separated list of accepted spellings, for error messages.
    pub fn expected_values() -> String {
        Self::all()
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for RiskType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidEnum {
                field: "risk_type",
                value: s.to_string(),
                expected: Self::expected_values(),
            })
    }
}

impl std::fmt::Display for RiskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
