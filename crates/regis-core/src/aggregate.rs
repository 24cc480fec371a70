//! # Aggregation
//!
//! Count-and-percentage breakdowns over risk types and conflict kinds.
//!
//! Percentages are `count / total * 100` rounded to two decimals. The
//! rounding is done in integer basis points with round-half-to-even, so the
//! same counts always produce the same `f64` regardless of platform float
//! behaviour. A zero total yields no shares rather than a division by zero.
//!
//! The two breakdowns differ deliberately in how they treat zeros:
//! [`RiskBreakdown`] omits each risk type with a zero count, while
//! [`ConflictBreakdown`] keeps both kinds whenever the combined total is
//! positive and drops both when it is zero.

use crate::conflict::ConflictKind;
use crate::risk::RiskType;

/// `count / total * 100`, rounded to two decimals. `0.0` when `total == 0`.
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let scaled = u128::from(count) * 10_000;
    let total = u128::from(total);
    let mut basis_points = scaled / total;
    let remainder = scaled % total;
    match (2 * remainder).cmp(&total) {
        std::cmp::Ordering::Greater => basis_points += 1,
        std::cmp::Ordering::Equal if basis_points % 2 == 1 => basis_points += 1,
        _ => {}
    }
    basis_points as f64 / 100.0
}

/// One row of a breakdown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Share<K> {
    /// The category being counted.
    pub key: K,
    /// Number of rows in the category.
    pub count: u64,
    /// `count` as a two-decimal percentage of the breakdown total.
    pub percentage: f64,
}

/// Requirement counts per risk type.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskBreakdown {
    /// Number of requirements counted.
    pub total: u64,
    /// Non-zero categories in [`RiskType::all`] order.
    pub shares: Vec<Share<RiskType>>,
}

impl RiskBreakdown {
    /// Tally the risk types of a requirement set.
    pub fn from_risk_types(risk_types: impl IntoIterator<Item = RiskType>) -> Self {
        let mut counts = [0u64; RiskType::COUNT];
        for risk in risk_types {
            counts[risk.index()] += 1;
        }
        Self::from_counts(counts)
    }

    /// Build a breakdown from per-category counts indexed by
    /// [`RiskType::index`].
    pub fn from_counts(counts: [u64; RiskType::COUNT]) -> Self {
        let total = counts.iter().sum();
        let shares = RiskType::all()
            .iter()
            .zip(counts)
            .filter(|(_, count)| *count > 0)
            .map(|(risk, count)| Share {
                key: *risk,
                count,
                percentage: percentage(count, total),
            })
            .collect();
        Self { total, shares }
    }
}

/// Contradiction and overlap counts.
#[derive(Debug, Clone, PartialEq)]
pub struct ConflictBreakdown {
    /// Contradictions plus overlaps.
    pub total: u64,
    /// Both kinds in [`ConflictKind::all`] order, or empty when `total` is 0.
    pub shares: Vec<Share<ConflictKind>>,
}

impl ConflictBreakdown {
    /// Build a breakdown from the two independently counted kinds.
    pub fn new(contradictions: u64, overlaps: u64) -> Self {
        let total = contradictions + overlaps;
        if total == 0 {
            return Self {
                total,
                shares: Vec::new(),
            };
        }
        let shares = [
            (ConflictKind::Contradiction, contradictions),
            (ConflictKind::Overlap, overlaps),
        ]
        .into_iter()
        .map(|(key, count)| Share {
            key,
            count,
            percentage: percentage(count, total),
        })
        .collect();
        Self { total, shares }
    }
}
