//! Hawk - technical indicator and dual-sided LONG/SHORT scoring engine for a morning stock screener

pub mod config;
pub mod error;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use config::ScreenerConfig;
pub use error::{Result, ScreenerError};
pub use services::{
    compute_snapshot, merge_enrichment, normalize_bars, passes_hard_gate, score_long,
    score_short, select_candidates, EnrichmentSource, NoEnrichment, Screener, StaticEnrichment,
};
pub use types::*;
