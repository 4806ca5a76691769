use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::services::enrichment::ENRICH_CONCURRENCY;
use crate::services::gate::{HardGate, MIN_AVG_VOLUME, MIN_RSI_RANGE};
use crate::services::selector::{EARNINGS_EVENTS_LIMIT, ENRICH_CAP, ENRICH_N, MIN_SCORE, TOP_N};

/// Instruments always tracked, exempt from the hard gate and always enriched.
pub const DEFAULT_INDEX_FUTURES: &[&str] = &["SI=F", "GC=F"];

/// Screener configuration.
#[derive(Debug, Clone)]
pub struct ScreenerConfig {
    /// Shortlist length per side.
    pub top_n: usize,
    /// Minimum score for a shortlist entry.
    pub min_score: u8,
    /// Top symbols per side sent for enrichment.
    pub enrich_n: usize,
    /// Ceiling on the enrichment set.
    pub enrich_cap: usize,
    /// Enrichment fetches in flight.
    pub enrich_concurrency: usize,
    /// Minimum 20-day average volume.
    pub min_avg_volume: f64,
    /// Minimum 20-bar RSI range.
    pub min_rsi_range: f64,
    /// Symbols treated as index futures.
    pub index_futures: Vec<String>,
    /// Upcoming earnings events reported.
    pub earnings_events_limit: usize,
    /// JSON file with bar histories (binary only).
    pub bars_path: Option<PathBuf>,
    /// JSON file with enrichment records (binary only).
    pub enrichment_path: Option<PathBuf>,
    /// JSON file with open positions (binary only).
    pub positions_path: Option<PathBuf>,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            top_n: TOP_N,
            min_score: MIN_SCORE,
            enrich_n: ENRICH_N,
            enrich_cap: ENRICH_CAP,
            enrich_concurrency: ENRICH_CONCURRENCY,
            min_avg_volume: MIN_AVG_VOLUME,
            min_rsi_range: MIN_RSI_RANGE,
            index_futures: DEFAULT_INDEX_FUTURES.iter().map(|s| s.to_string()).collect(),
            earnings_events_limit: EARNINGS_EVENTS_LIMIT,
            bars_path: None,
            enrichment_path: None,
            positions_path: None,
        }
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

impl ScreenerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // Format: "SI=F,GC=F"
        let index_futures = lookup("INDEX_FUTURES")
            .map(|s| {
                s.split(',')
                    .map(|sym| sym.trim().to_string())
                    .filter(|sym| !sym.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.index_futures);

        Self {
            top_n: parse_or(lookup("TOP_N"), defaults.top_n),
            min_score: parse_or(lookup("MIN_SCORE"), defaults.min_score),
            enrich_n: parse_or(lookup("ENRICH_N"), defaults.enrich_n),
            enrich_cap: parse_or(lookup("ENRICH_CAP"), defaults.enrich_cap),
            enrich_concurrency: parse_or(lookup("ENRICH_CONCURRENCY"), defaults.enrich_concurrency)
                .max(1),
            min_avg_volume: parse_or(lookup("MIN_AVG_VOLUME"), defaults.min_avg_volume),
            min_rsi_range: parse_or(lookup("MIN_RSI_RANGE"), defaults.min_rsi_range),
            index_futures,
            earnings_events_limit: parse_or(
                lookup("EARNINGS_EVENTS_LIMIT"),
                defaults.earnings_events_limit,
            ),
            bars_path: lookup("SCREENER_BARS_PATH").map(PathBuf::from),
            enrichment_path: lookup("SCREENER_ENRICHMENT_PATH").map(PathBuf::from),
            positions_path: lookup("SCREENER_POSITIONS_PATH").map(PathBuf::from),
        }
    }

    /// Hard gate built from the configured thresholds.
    pub fn gate(&self) -> HardGate {
        HardGate::new(self.min_avg_volume, self.min_rsi_range)
    }

    pub fn is_index_future(&self, symbol: &str) -> bool {
        self.index_futures.iter().any(|s| s == symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> ScreenerConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ScreenerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.top_n, 5);
        assert_eq!(config.min_score, 25);
        assert_eq!(config.enrich_n, 10);
        assert_eq!(config.enrich_cap, 30);
        assert_eq!(config.min_avg_volume, 100_000.0);
        assert_eq!(config.min_rsi_range, 15.0);
        assert_eq!(config.index_futures, vec!["SI=F", "GC=F"]);
        assert!(config.bars_path.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("TOP_N", "3"),
            ("MIN_SCORE", " 40 "),
            ("INDEX_FUTURES", "ES=F, NQ=F,,"),
            ("SCREENER_BARS_PATH", "/tmp/bars.json"),
        ]);
        assert_eq!(config.top_n, 3);
        assert_eq!(config.min_score, 40);
        assert_eq!(config.index_futures, vec!["ES=F", "NQ=F"]);
        assert!(config.is_index_future("NQ=F"));
        assert!(!config.is_index_future("GC=F"));
        assert_eq!(config.bars_path, Some(PathBuf::from("/tmp/bars.json")));
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = config_from(&[
            ("TOP_N", "five"),
            ("MIN_SCORE", "300"),
            ("ENRICH_CONCURRENCY", "0"),
        ]);
        assert_eq!(config.top_n, 5);
        assert_eq!(config.min_score, 25);
        assert_eq!(config.enrich_concurrency, 1);
    }

    #[test]
    fn test_gate_uses_thresholds() {
        let config = config_from(&[("MIN_AVG_VOLUME", "250000")]);
        assert_eq!(config.gate().min_avg_volume, 250_000.0);
    }
}
