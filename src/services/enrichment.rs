//! Enrichment: late-arriving slow fields merged into existing snapshots.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use chrono::NaiveDate;
use futures_util::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::error::{Result, ScreenerError};
use crate::types::{EnrichmentRecord, TechnicalSnapshot};

/// Default number of enrichment fetches in flight.
pub const ENRICH_CONCURRENCY: usize = 4;

/// Supplier of per-symbol enrichment records.
///
/// Implementations own their own I/O, retries and timeouts. An `Err` only
/// means the fields stay empty for that symbol.
pub trait EnrichmentSource: Send + Sync {
    /// Source name for logging.
    fn name(&self) -> &str;

    fn fetch<'a>(
        &'a self,
        symbol: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<EnrichmentRecord>> + Send + 'a>>;
}

/// Pre-fetched records keyed by symbol.
#[derive(Debug, Clone, Default)]
pub struct StaticEnrichment {
    records: HashMap<String, EnrichmentRecord>,
}

impl StaticEnrichment {
    pub fn new(records: HashMap<String, EnrichmentRecord>) -> Self {
        Self { records }
    }

    pub fn insert(&mut self, symbol: impl Into<String>, record: EnrichmentRecord) {
        self.records.insert(symbol.into(), record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl EnrichmentSource for StaticEnrichment {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch<'a>(
        &'a self,
        symbol: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<EnrichmentRecord>> + Send + 'a>> {
        Box::pin(async move {
            self.records
                .get(symbol)
                .cloned()
                .ok_or_else(|| ScreenerError::EnrichmentUnavailable {
                    symbol: symbol.to_string(),
                    reason: "no record".to_string(),
                })
        })
    }
}

/// Source that never has anything; every symbol keeps null enrichment fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnrichment;

impl EnrichmentSource for NoEnrichment {
    fn name(&self) -> &str {
        "none"
    }

    fn fetch<'a>(
        &'a self,
        symbol: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<EnrichmentRecord>> + Send + 'a>> {
        Box::pin(async move {
            Err(ScreenerError::EnrichmentUnavailable {
                symbol: symbol.to_string(),
                reason: "no enrichment source".to_string(),
            })
        })
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

/// Merge an enrichment record into a snapshot.
///
/// Only enrichment fields that are still `None` are filled; technical fields
/// are never touched. An earnings date before `scan_date` is discarded, as are
/// negative or non-finite numbers and blank sectors. Merging the same record
/// twice gives the same snapshot as merging it once.
pub fn merge_enrichment(
    snapshot: &TechnicalSnapshot,
    record: &EnrichmentRecord,
    scan_date: NaiveDate,
) -> TechnicalSnapshot {
    let mut merged = snapshot.clone();

    if merged.analyst_rating.is_none() {
        merged.analyst_rating = record.analyst_rating;
    }
    if merged.short_pct_of_float.is_none() {
        merged.short_pct_of_float = finite(record.short_pct_of_float);
    }
    if merged.market_cap.is_none() {
        merged.market_cap = finite(record.market_cap);
    }
    if merged.sector.is_none() {
        merged.sector = record
            .sector
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
    }
    if merged.next_earnings_date.is_none() {
        merged.next_earnings_date = record.next_earnings_date.filter(|d| *d >= scan_date);
    }

    merged
}

/// Fetch records for `symbols` with at most `concurrency` requests in flight.
///
/// Failed fetches are logged and left out of the result.
pub async fn fetch_all<S: EnrichmentSource + ?Sized>(
    source: &S,
    symbols: &[String],
    concurrency: usize,
) -> HashMap<String, EnrichmentRecord> {
    let results: Vec<(String, Result<EnrichmentRecord>)> = stream::iter(symbols)
        .map(|symbol| async move { (symbol.clone(), source.fetch(symbol).await) })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    let mut records = HashMap::with_capacity(results.len());
    for (symbol, result) in results {
        match result {
            Ok(record) => {
                records.insert(symbol, record);
            }
            Err(e @ ScreenerError::EnrichmentUnavailable { .. }) => {
                debug!("{}: {}", source.name(), e);
            }
            Err(e) => {
                warn!("{} enrichment failed for {}: {}", source.name(), symbol, e);
            }
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::scoring::fixtures::*;
    use crate::types::AnalystRating;

    fn scan_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    fn record() -> EnrichmentRecord {
        EnrichmentRecord {
            analyst_rating: Some(AnalystRating::Buy),
            short_pct_of_float: Some(0.12),
            market_cap: Some(2.5e12),
            sector: Some("Technology".to_string()),
            next_earnings_date: NaiveDate::from_ymd_opt(2024, 7, 25),
        }
    }

    #[test]
    fn test_merge_fills_null_fields() {
        let merged = merge_enrichment(&uptrend_pullback(), &record(), scan_date());
        assert_eq!(merged.analyst_rating, Some(AnalystRating::Buy));
        assert_eq!(merged.short_pct_of_float, Some(0.12));
        assert_eq!(merged.sector.as_deref(), Some("Technology"));
        assert!(merged.is_enriched());
        // Technical fields untouched
        assert_eq!(merged.rsi, 40.0);
        assert_eq!(merged.adx, Some(30.0));
    }

    #[test]
    fn test_merge_never_overwrites() {
        let mut s = uptrend_pullback();
        s.sector = Some("Semiconductors".to_string());
        s.analyst_rating = Some(AnalystRating::Hold);
        let merged = merge_enrichment(&s, &record(), scan_date());
        assert_eq!(merged.sector.as_deref(), Some("Semiconductors"));
        assert_eq!(merged.analyst_rating, Some(AnalystRating::Hold));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let s = downtrend_bounce();
        let once = merge_enrichment(&s, &record(), scan_date());
        let twice = merge_enrichment(&once, &record(), scan_date());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_past_earnings_discarded() {
        let mut r = record();
        r.next_earnings_date = NaiveDate::from_ymd_opt(2024, 5, 30);
        let merged = merge_enrichment(&empty(50.0), &r, scan_date());
        assert_eq!(merged.next_earnings_date, None);

        r.next_earnings_date = Some(scan_date());
        let merged = merge_enrichment(&empty(50.0), &r, scan_date());
        assert_eq!(merged.next_earnings_date, Some(scan_date()));
    }

    #[test]
    fn test_bad_values_discarded() {
        let r = EnrichmentRecord {
            short_pct_of_float: Some(f64::NAN),
            market_cap: Some(-1.0),
            sector: Some("   ".to_string()),
            ..Default::default()
        };
        let merged = merge_enrichment(&empty(50.0), &r, scan_date());
        assert!(!merged.is_enriched());
    }

    #[tokio::test]
    async fn test_fetch_all_skips_missing() {
        let mut source = StaticEnrichment::default();
        source.insert("AAPL", record());
        source.insert("NVDA", EnrichmentRecord::default());

        let symbols = vec!["AAPL".to_string(), "NVDA".to_string(), "ZZZZ".to_string()];
        let records = fetch_all(&source, &symbols, 2).await;
        assert_eq!(records.len(), 2);
        assert_eq!(records["AAPL"], record());
        assert!(!records.contains_key("ZZZZ"));
    }

    #[tokio::test]
    async fn test_no_enrichment_fetches_nothing() {
        let symbols = vec!["AAPL".to_string(), "MSFT".to_string()];
        let records = fetch_all(&NoEnrichment, &symbols, ENRICH_CONCURRENCY).await;
        assert!(records.is_empty());
        assert!(NoEnrichment.fetch("AAPL").await.is_err());
    }
}
