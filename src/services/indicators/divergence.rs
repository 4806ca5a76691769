//! Swing-point RSI divergence detection.

use crate::types::RsiDivergence;

/// Trailing window the swing points are searched in.
pub const DIVERGENCE_LOOKBACK: usize = 20;

/// Neighbours on each side a swing point must beat.
const SWING_RADIUS: usize = 2;

/// Detect RSI divergence over the trailing `lookback` bars.
///
/// A bar is a swing low (high) if its close is strictly below (above) the two
/// closes on either side. Only the two most recent swings of each kind are
/// compared. Bullish: price makes a lower low while RSI makes a higher low.
/// Bearish: price makes a higher high while RSI makes a lower high. Bullish is
/// checked first. Windows with fewer than `lookback - 5` RSI readings report
/// no divergence.
pub fn detect_divergence(closes: &[f64], rsi: &[Option<f64>], lookback: usize) -> RsiDivergence {
    if lookback < 2 * SWING_RADIUS + 1 || closes.len() < lookback || rsi.len() < lookback {
        return RsiDivergence::None;
    }

    let c = &closes[closes.len() - lookback..];
    let r = &rsi[rsi.len() - lookback..];

    let valid = r.iter().filter(|v| v.is_some()).count();
    if valid < lookback.saturating_sub(5) {
        return RsiDivergence::None;
    }

    let mut swing_lows: Vec<(f64, f64)> = Vec::new();
    let mut swing_highs: Vec<(f64, f64)> = Vec::new();

    for i in SWING_RADIUS..lookback - SWING_RADIUS {
        let Some(rsi_at) = r[i] else {
            continue;
        };
        let neighbours = [c[i - 2], c[i - 1], c[i + 1], c[i + 2]];
        if neighbours.iter().all(|&n| c[i] < n) {
            swing_lows.push((c[i], rsi_at));
        }
        if neighbours.iter().all(|&n| c[i] > n) {
            swing_highs.push((c[i], rsi_at));
        }
    }

    if let [.., (prev_price, prev_rsi), (cur_price, cur_rsi)] = swing_lows[..] {
        if cur_price < prev_price && cur_rsi > prev_rsi {
            return RsiDivergence::Bullish;
        }
    }

    if let [.., (prev_price, prev_rsi), (cur_price, cur_rsi)] = swing_highs[..] {
        if cur_price > prev_price && cur_rsi < prev_rsi {
            return RsiDivergence::Bearish;
        }
    }

    RsiDivergence::None
}
