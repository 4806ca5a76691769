pub mod bar_series;
pub mod enrichment;
pub mod gate;
pub mod indicators;
pub mod screener;
pub mod scoring;
pub mod selector;
pub mod snapshot;

pub use bar_series::normalize_bars;
pub use enrichment::{fetch_all, merge_enrichment, EnrichmentSource, NoEnrichment, StaticEnrichment};
pub use gate::{passes_hard_gate, HardGate};
pub use screener::Screener;
pub use scoring::{score, score_long, score_short, DISPLAY_SIGNALS};
pub use selector::{
    enrichment_set, rank_side, select_candidates, select_side, upcoming_earnings, Candidates,
};
pub use snapshot::{compute_snapshot, MIN_BARS};
