//! One full scan: snapshots, gate, enrichment, selection.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::ScreenerConfig;
use crate::services::enrichment::{fetch_all, merge_enrichment, EnrichmentSource};
use crate::services::gate::HardGate;
use crate::services::selector::{enrichment_set, select_candidates, upcoming_earnings};
use crate::services::snapshot::compute_snapshot;
use crate::types::{BarSeries, OpenPosition, ScanReport, SkippedSymbol, TechnicalSnapshot};

/// Morning screener over a symbol universe.
pub struct Screener<S: EnrichmentSource> {
    config: ScreenerConfig,
    gate: HardGate,
    source: S,
}

impl<S: EnrichmentSource> Screener<S> {
    pub fn new(config: ScreenerConfig, source: S) -> Self {
        let gate = config.gate();
        Self {
            config,
            gate,
            source,
        }
    }

    pub fn config(&self) -> &ScreenerConfig {
        &self.config
    }

    /// Compute a snapshot per series. A failing symbol is recorded and skipped.
    pub fn compute_all(
        &self,
        universe: &[BarSeries],
    ) -> (Vec<TechnicalSnapshot>, Vec<SkippedSymbol>) {
        let mut snapshots = Vec::with_capacity(universe.len());
        let mut skipped = Vec::new();

        for series in universe {
            let is_future = self.config.is_index_future(&series.symbol);
            match compute_snapshot(&series.symbol, &series.bars, is_future) {
                Ok(snapshot) => snapshots.push(snapshot),
                Err(e) => {
                    debug!("Skipping {}: {}", series.symbol, e);
                    skipped.push(SkippedSymbol {
                        symbol: series.symbol.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        (snapshots, skipped)
    }

    /// Run a scan stamped with the current time.
    pub async fn run(&self, universe: &[BarSeries], positions: &[OpenPosition]) -> ScanReport {
        self.run_at(universe, positions, Utc::now()).await
    }

    /// Run a scan as of `scanned_at`. Earnings dates before its date are ignored.
    pub async fn run_at(
        &self,
        universe: &[BarSeries],
        positions: &[OpenPosition],
        scanned_at: DateTime<Utc>,
    ) -> ScanReport {
        let scan_id = Uuid::new_v4();
        let total_scanned = universe.len();
        info!("Scan {} started: {} symbols", scan_id, total_scanned);

        // Phase 1: technicals
        let (computed, skipped) = self.compute_all(universe);
        info!(
            "Technicals for {} symbols ({} skipped)",
            computed.len(),
            skipped.len()
        );

        // Phase 2: hard gate
        let gated = self.gate.retain(computed.clone());
        info!("Hard gate: {} passed", gated.len());

        // Phase 3: enrichment set from pre-scores. Only gated symbols are merged later
        let available: HashSet<&str> = gated.iter().map(|s| s.symbol.as_str()).collect();
        let mut always_include: Vec<String> = Vec::new();
        for symbol in positions
            .iter()
            .map(|p| p.symbol.as_str())
            .chain(self.config.index_futures.iter().map(String::as_str))
        {
            if available.contains(symbol) && !always_include.iter().any(|s| s == symbol) {
                always_include.push(symbol.to_string());
            }
        }
        let to_enrich = enrichment_set(
            &gated,
            &always_include,
            self.config.enrich_n,
            self.config.enrich_cap,
        );

        // Phase 4: fetch
        info!(
            "Enriching {} candidates via {}",
            to_enrich.len(),
            self.source.name()
        );
        let records = fetch_all(&self.source, &to_enrich, self.config.enrich_concurrency).await;

        // Phase 5: merge and final selection
        let scan_date = scanned_at.date_naive();
        let enriched_snapshots: Vec<TechnicalSnapshot> = gated
            .iter()
            .map(|s| match records.get(&s.symbol) {
                Some(record) => merge_enrichment(s, record, scan_date),
                None => s.clone(),
            })
            .collect();

        let mut candidates = select_candidates(
            &enriched_snapshots,
            self.config.top_n,
            self.config.min_score,
        );
        candidates.annotate_positions(positions, &computed);
        let upcoming = upcoming_earnings(&enriched_snapshots, self.config.earnings_events_limit);

        info!(
            "Scan {} complete: {} long, {} short",
            scan_id,
            candidates.long.len(),
            candidates.short.len()
        );

        // Phase 6: report
        ScanReport {
            scan_id,
            scanned_at,
            total_scanned,
            computed: computed.len(),
            passed: gated.len(),
            enriched: records.len(),
            long: candidates.long,
            short: candidates.short,
            upcoming_earnings: upcoming,
            skipped,
        }
    }
}
