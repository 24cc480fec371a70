//! # Jurisdictions
//!
//! A jurisdiction names the regulatory body or region a requirement or
//! conflict record is scoped to. Stored values are free strings; the
//! [`Jurisdiction`] catalogue lists the codes the ingestion pipeline emits.
//!
//! ## Filtering
//!
//! Query filters compare jurisdictions by exact, case-sensitive equality.
//! An unknown code is not an error, it simply matches nothing. An empty
//! filter value is treated as "no filter" (see [`normalize_filter`]).

use serde::{Deserialize, Serialize};

/// Jurisdiction assigned to a requirement when ingestion does not specify one.
pub const DEFAULT_JURISDICTION: &str = "GLOBAL";

/// Known jurisdiction codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Jurisdiction {
    /// European Union legislation.
    #[serde(rename = "EU")]
    Eu,
    /// European Securities and Markets Authority.
    #[serde(rename = "ESMA")]
    Esma,
    /// European Banking Authority.
    #[serde(rename = "EBA")]
    Eba,
    /// European Central Bank.
    #[serde(rename = "ECB")]
    Ecb,
    /// Basel Committee on Banking Supervision.
    #[serde(rename = "Basel")]
    Basel,
    /// US Financial Crimes Enforcement Network.
    #[serde(rename = "FinCEN")]
    FinCen,
    /// Financial Stability Board.
    #[serde(rename = "FSB")]
    Fsb,
    /// Not tied to a single regulator.
    #[serde(rename = "GLOBAL")]
    Global,
    /// UK Financial Conduct Authority.
    #[serde(rename = "UK-FCA")]
    UkFca,
    /// Anything else.
    #[serde(rename = "OTHER")]
    Other,
}

impl Jurisdiction {
    /// All catalogue entries in declaration order.
    pub fn all() -> &'static [Jurisdiction] {
        &[
            Self::Eu,
            Self::Esma,
            Self::Eba,
            Self::Ecb,
            Self::Basel,
            Self::FinCen,
            Self::Fsb,
            Self::Global,
            Self::UkFca,
            Self::Other,
        ]
    }

    /// The stored spelling of this jurisdiction.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eu => "EU",
            Self::Esma => "ESMA",
            Self::Eba => "EBA",
            Self::Ecb => "ECB",
            Self::Basel => "Basel",
            Self::FinCen => "FinCEN",
            Self::Fsb => "FSB",
            Self::Global => DEFAULT_JURISDICTION,
            Self::UkFca => "UK-FCA",
            Self::Other => "OTHER",
        }
    }

    /// Look up a catalogue entry by its exact stored spelling.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().iter().copied().find(|j| j.as_str() == code)
    }
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collapse an empty jurisdiction filter to `None`.
///
/// Non-empty values are returned untouched: no trimming, no case folding.
pub fn normalize_filter(jurisdiction: Option<&str>) -> Option<&str> {
    jurisdiction.filter(|j| !j.is_empty())
}
