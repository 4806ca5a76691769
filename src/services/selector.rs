//! Candidate selection: per-side shortlists, the enrichment set and upcoming earnings.

use std::collections::HashSet;

use crate::services::scoring;
use crate::types::{
    EarningsEvent, OpenPosition, PositionAlignment, RankedCandidate, ScoreResult, Side,
    TechnicalSnapshot,
};

/// Default shortlist length per side.
pub const TOP_N: usize = 5;

/// Default minimum score for a shortlist entry.
pub const MIN_SCORE: u8 = 25;

/// Default number of top symbols per side sent for enrichment.
pub const ENRICH_N: usize = 10;

/// Default ceiling on the enrichment set.
pub const ENRICH_CAP: usize = 30;

/// Default number of upcoming earnings events reported.
pub const EARNINGS_EVENTS_LIMIT: usize = 5;

/// Shortlists for both sides. An empty side means "no strong setups".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidates {
    pub long: Vec<RankedCandidate>,
    pub short: Vec<RankedCandidate>,
}

/// Score every snapshot for one side and order them best first.
///
/// The sort is stable, so equal scores keep their input order.
pub fn rank_side<'a>(
    snapshots: &'a [TechnicalSnapshot],
    side: Side,
) -> Vec<(&'a TechnicalSnapshot, ScoreResult)> {
    let mut ranked: Vec<_> = snapshots
        .iter()
        .map(|s| (s, scoring::score(side, s)))
        .collect();
    ranked.sort_by(|a, b| b.1.score.cmp(&a.1.score));
    ranked
}

/// Top `top_n` gated snapshots for one side scoring at least `min_score`.
pub fn select_side(
    snapshots: &[TechnicalSnapshot],
    side: Side,
    top_n: usize,
    min_score: u8,
) -> Vec<RankedCandidate> {
    rank_side(snapshots, side)
        .into_iter()
        .take(top_n)
        .take_while(|(_, result)| result.score >= min_score)
        .enumerate()
        .map(|(i, (snapshot, result))| RankedCandidate {
            rank: i + 1,
            symbol: snapshot.symbol.clone(),
            side,
            result,
            sector: snapshot.sector.clone(),
            position: None,
        })
        .collect()
}

/// Shortlists for both sides from the gated snapshots.
pub fn select_candidates(
    snapshots: &[TechnicalSnapshot],
    top_n: usize,
    min_score: u8,
) -> Candidates {
    Candidates {
        long: select_side(snapshots, Side::Long, top_n, min_score),
        short: select_side(snapshots, Side::Short, top_n, min_score),
    }
}

impl Candidates {
    pub fn side(&self, side: Side) -> &[RankedCandidate] {
        match side {
            Side::Long => &self.long,
            Side::Short => &self.short,
        }
    }

    /// Mark candidates the portfolio already holds.
    ///
    /// Direction comes from each position's knock-out level against the
    /// snapshot price; a symbol without a snapshot has unknown direction.
    pub fn annotate_positions(
        &mut self,
        positions: &[OpenPosition],
        snapshots: &[TechnicalSnapshot],
    ) {
        if positions.is_empty() {
            return;
        }
        for candidate in self.long.iter_mut().chain(self.short.iter_mut()) {
            let Some(position) = positions.iter().find(|p| p.symbol == candidate.symbol) else {
                continue;
            };
            let price = snapshots
                .iter()
                .find(|s| s.symbol == candidate.symbol)
                .map(|s| s.price);
            candidate.position = Some(PositionAlignment::between(
                candidate.side,
                position.direction(price),
            ));
        }
    }
}

/// Symbols to enrich, deduplicated and capped.
///
/// `always_include` (held positions, tracked futures) comes first in the
/// given order, then the top `top_k` of each side interleaved by rank, so the
/// cap drops the weakest pre-scores first.
pub fn enrichment_set(
    gated: &[TechnicalSnapshot],
    always_include: &[String],
    top_k: usize,
    cap: usize,
) -> Vec<String> {
    let long = rank_side(gated, Side::Long);
    let short = rank_side(gated, Side::Short);

    let ranked = long
        .iter()
        .zip(short.iter())
        .take(top_k)
        .flat_map(|((l, _), (s, _))| [l.symbol.as_str(), s.symbol.as_str()]);

    let mut seen = HashSet::new();
    always_include
        .iter()
        .map(String::as_str)
        .chain(ranked)
        .filter(|symbol| seen.insert(*symbol))
        .take(cap)
        .map(str::to_string)
        .collect()
}

/// Earliest upcoming earnings dates among the given snapshots.
pub fn upcoming_earnings(snapshots: &[TechnicalSnapshot], limit: usize) -> Vec<EarningsEvent> {
    let mut events: Vec<EarningsEvent> = snapshots
        .iter()
        .filter_map(|s| {
            s.next_earnings_date.map(|date| EarningsEvent {
                date,
                symbol: s.symbol.clone(),
            })
        })
        .collect();
    events.sort();
    events.truncate(limit);
    events
}
