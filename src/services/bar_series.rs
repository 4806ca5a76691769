//! Normalizes provider history into a clean, date-ascending `BarSeries`.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{Result, ScreenerError};
use crate::services::snapshot::MIN_BARS;
use crate::types::{Bar, BarSeries, RawBar};

fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Convert one provider row, dropping it if any price field is missing or non-finite.
fn to_bar(raw: &RawBar) -> Option<Bar> {
    Some(Bar {
        date: raw.date,
        open: usable(raw.open)?,
        high: usable(raw.high)?,
        low: usable(raw.low)?,
        close: usable(raw.close)?,
        volume: usable(raw.volume).unwrap_or(0.0).max(0.0),
    })
}

/// Normalize provider rows for one symbol.
///
/// Rows with gaps in open/high/low/close are dropped, a missing volume reads as 0,
/// rows are ordered by date, and a repeated date keeps the row that came last.
/// Fewer than 30 usable rows is `InsufficientData`.
pub fn normalize_bars(symbol: &str, raw: &[RawBar]) -> Result<BarSeries> {
    let mut by_date = BTreeMap::new();
    let mut dropped = 0usize;

    for row in raw {
        match to_bar(row) {
            Some(bar) => {
                by_date.insert(bar.date, bar);
            }
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!("{}: dropped {} incomplete bars", symbol, dropped);
    }

    let bars: Vec<Bar> = by_date.into_values().collect();
    if bars.len() < MIN_BARS {
        return Err(ScreenerError::InsufficientData {
            symbol: symbol.to_string(),
            required: MIN_BARS,
            provided: bars.len(),
        });
    }

    Ok(BarSeries {
        symbol: symbol.to_string(),
        bars,
    })
}
