use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::AnalystRating;

/// RSI divergence against price over the trailing swing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiDivergence {
    /// Price lower low, RSI higher low.
    Bullish,
    /// Price higher high, RSI lower high.
    Bearish,
    #[default]
    None,
}

/// Direction of the MACD histogram versus the prior bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacdDirection {
    Increasing,
    Decreasing,
}

/// Every indicator derived for one symbol in one scan.
///
/// `None` always means "not computed" (window too short or the arithmetic
/// produced a non-finite value). `price` and `rsi` are required; a symbol
/// without them never gets a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSnapshot {
    pub symbol: String,
    /// Date of the bar the snapshot was computed from.
    pub as_of: NaiveDate,
    pub is_index_future: bool,

    pub price: f64,
    pub change_pct: f64,

    // RSI
    pub rsi: f64,
    pub rsi_delta: Option<f64>,
    pub rsi_divergence: RsiDivergence,
    pub rsi_range_20d: Option<f64>,
    pub rsi_had_extreme_20d: bool,

    // MACD
    pub macd_hist: Option<f64>,
    pub macd_hist_prev: Option<f64>,
    pub macd_hist_direction: Option<MacdDirection>,
    pub macd_converging: bool,

    // Volatility / trend
    pub atr_pct: Option<f64>,
    pub adx: Option<f64>,
    pub plus_di: Option<f64>,
    pub minus_di: Option<f64>,

    // Moving averages
    pub sma50: Option<f64>,
    pub sma200: Option<f64>,
    pub sma50_distance_pct: Option<f64>,
    pub sma200_distance_pct: Option<f64>,

    // Volume
    pub avg_volume_20d: f64,
    pub volume_today: f64,
    pub volume_ratio: f64,

    // Bollinger
    pub bb_width_percentile: Option<f64>,
    pub bb_position: Option<f64>,

    pub change_5d_pct: Option<f64>,

    // Enrichment, filled by a later merge
    pub analyst_rating: Option<AnalystRating>,
    pub short_pct_of_float: Option<f64>,
    pub market_cap: Option<f64>,
    pub sector: Option<String>,
    pub next_earnings_date: Option<NaiveDate>,
}

impl TechnicalSnapshot {
    /// Snapshot with only the required fields set. Everything else is "not computed".
    pub fn bare(symbol: impl Into<String>, as_of: NaiveDate, price: f64, rsi: f64) -> Self {
        Self {
            symbol: symbol.into(),
            as_of,
            is_index_future: false,
            price,
            change_pct: 0.0,
            rsi,
            rsi_delta: None,
            rsi_divergence: RsiDivergence::None,
            rsi_range_20d: None,
            rsi_had_extreme_20d: false,
            macd_hist: None,
            macd_hist_prev: None,
            macd_hist_direction: None,
            macd_converging: false,
            atr_pct: None,
            adx: None,
            plus_di: None,
            minus_di: None,
            sma50: None,
            sma200: None,
            sma50_distance_pct: None,
            sma200_distance_pct: None,
            avg_volume_20d: 0.0,
            volume_today: 0.0,
            volume_ratio: 0.0,
            bb_width_percentile: None,
            bb_position: None,
            change_5d_pct: None,
            analyst_rating: None,
            short_pct_of_float: None,
            market_cap: None,
            sector: None,
            next_earnings_date: None,
        }
    }

    /// Whether any enrichment field has been populated.
    pub fn is_enriched(&self) -> bool {
        self.analyst_rating.is_some()
            || self.short_pct_of_float.is_some()
            || self.market_cap.is_some()
            || self.sector.is_some()
            || self.next_earnings_date.is_some()
    }
}
