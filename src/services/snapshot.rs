//! Indicator calculator: one symbol's bars in, one `TechnicalSnapshot` out.

use tracing::trace;

use crate::error::{Result, ScreenerError};
use crate::services::indicators::{
    detect_divergence, divergence::DIVERGENCE_LOOKBACK, pct_change, round_to, Adx, Atr,
    BollingerBands, Indicator, Macd, Rsi, Sma, VolumeStats,
};
use crate::types::{Bar, RsiDivergence, TechnicalSnapshot};

/// Fewer bars than this and the symbol is skipped outright.
pub const MIN_BARS: usize = 30;

/// Bars back for the RSI momentum delta and the short-term change.
const LOOKBACK_5D: usize = 5;

/// Window for the RSI oscillation-quality check.
const RSI_RANGE_WINDOW: usize = 20;

/// Run an indicator, logging when it has to leave its field empty.
fn run<I: Indicator>(symbol: &str, indicator: &I, bars: &[Bar]) -> Option<I::Output> {
    let output = indicator.calculate(bars);
    if output.is_none() {
        trace!(
            "{}: {} not computed ({} bars, needs {})",
            symbol,
            indicator.id(),
            bars.len(),
            indicator.min_periods()
        );
    }
    output
}

/// Derive the full technical snapshot for one symbol.
///
/// `bars` must be date-ascending. Fails only when there are fewer than 30 bars,
/// the latest close is not positive, or RSI cannot be computed; any other
/// indicator that cannot be computed is left as `None`.
pub fn compute_snapshot(
    symbol: &str,
    bars: &[Bar],
    is_index_future: bool,
) -> Result<TechnicalSnapshot> {
    if bars.len() < MIN_BARS {
        return Err(ScreenerError::InsufficientData {
            symbol: symbol.to_string(),
            required: MIN_BARS,
            provided: bars.len(),
        });
    }

    let last = bars[bars.len() - 1];
    let price = last.close;
    if !price.is_finite() || price <= 0.0 {
        return Err(ScreenerError::InvalidPrice {
            symbol: symbol.to_string(),
            price,
        });
    }

    let prev_close = bars[bars.len() - 2].close;
    let change_pct = pct_change(prev_close, price)
        .map(|c| round_to(c, 2))
        .unwrap_or(0.0);

    let rsi = run(symbol, &Rsi::default(), bars).ok_or_else(|| ScreenerError::UndefinedRsi {
        symbol: symbol.to_string(),
    })?;

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let rsi_divergence = detect_divergence(&closes, &rsi.series, DIVERGENCE_LOOKBACK);
    let (rsi_range_20d, rsi_had_extreme_20d) = match rsi.range_quality(RSI_RANGE_WINDOW) {
        Some((range, had_extreme)) => (Some(range), had_extreme),
        None => (None, false),
    };

    let macd = run(symbol, &Macd::default(), bars);
    let adx = run(symbol, &Adx::default(), bars);
    let bollinger = run(symbol, &BollingerBands::default(), bars);
    let volume = run(symbol, &VolumeStats::default(), bars);

    let sma50 = run(symbol, &Sma::new(50), bars);
    let sma200 = run(symbol, &Sma::new(200), bars);

    let change_5d_pct = if bars.len() > LOOKBACK_5D {
        pct_change(bars[bars.len() - 1 - LOOKBACK_5D].close, price).map(|c| round_to(c, 2))
    } else {
        None
    };

    let mut snapshot = TechnicalSnapshot::bare(symbol, last.date, price, rsi.value);
    snapshot.is_index_future = is_index_future;
    snapshot.change_pct = change_pct;

    snapshot.rsi_delta = rsi.delta(LOOKBACK_5D);
    snapshot.rsi_divergence = rsi_divergence;
    snapshot.rsi_range_20d = rsi_range_20d;
    snapshot.rsi_had_extreme_20d = rsi_had_extreme_20d;

    if let Some(macd) = macd {
        snapshot.macd_hist = Some(macd.histogram);
        snapshot.macd_hist_prev = Some(macd.histogram_prev);
        snapshot.macd_hist_direction = Some(macd.direction);
        snapshot.macd_converging = macd.converging;
    }

    snapshot.atr_pct = run(symbol, &Atr::default(), bars);
    if let Some(adx) = adx {
        snapshot.adx = Some(adx.adx);
        snapshot.plus_di = Some(adx.plus_di);
        snapshot.minus_di = Some(adx.minus_di);
    }

    snapshot.sma50 = sma50;
    snapshot.sma200 = sma200;
    snapshot.sma50_distance_pct = sma50.and_then(|sma| Sma::distance_pct(price, sma));
    snapshot.sma200_distance_pct = sma200.and_then(|sma| Sma::distance_pct(price, sma));

    if let Some(volume) = volume {
        snapshot.avg_volume_20d = volume.avg_volume;
        snapshot.volume_today = volume.volume_today;
        snapshot.volume_ratio = volume.volume_ratio;
    }

    if let Some(bollinger) = bollinger {
        snapshot.bb_width_percentile = bollinger.width_percentile;
        snapshot.bb_position = bollinger.position;
    }

    snapshot.change_5d_pct = change_5d_pct;

    if snapshot.rsi_divergence != RsiDivergence::None {
        trace!("{}: RSI divergence {:?}", symbol, snapshot.rsi_divergence);
    }

    Ok(snapshot)
}
