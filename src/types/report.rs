use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PositionAlignment, ScoreResult, Side};

/// A symbol that made one side's shortlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    /// 1-based rank within its side.
    pub rank: usize,
    pub symbol: String,
    pub side: Side,
    pub result: ScoreResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionAlignment>,
}

/// An upcoming earnings release among gated symbols.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EarningsEvent {
    pub date: NaiveDate,
    pub symbol: String,
}

/// Why a symbol produced no snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSymbol {
    pub symbol: String,
    pub reason: String,
}

/// Result of one full scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub scan_id: Uuid,
    pub scanned_at: DateTime<Utc>,
    pub total_scanned: usize,
    /// Symbols that produced a snapshot.
    pub computed: usize,
    /// Snapshots that passed the hard gate.
    pub passed: usize,
    /// Symbols that went through the enrichment pass.
    pub enriched: usize,
    pub long: Vec<RankedCandidate>,
    pub short: Vec<RankedCandidate>,
    pub upcoming_earnings: Vec<EarningsEvent>,
    pub skipped: Vec<SkippedSymbol>,
}

impl ScanReport {
    /// Candidates for one side. Empty means "no strong setups".
    pub fn side(&self, side: Side) -> &[RankedCandidate] {
        match side {
            Side::Long => &self.long,
            Side::Short => &self.short,
        }
    }

    pub fn has_strong_setups(&self, side: Side) -> bool {
        !self.side(side).is_empty()
    }
}
