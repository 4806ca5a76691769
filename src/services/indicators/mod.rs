//! Technical indicator implementations.
//!
//! Each indicator reads a date-ascending bar slice and returns `None` when the
//! window is too short or the arithmetic goes non-finite. Callers treat `None`
//! as "not computed" for that field only.

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod divergence;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod volume;

pub use adx::{Adx, AdxOutput};
pub use atr::Atr;
pub use bollinger::{BollingerBands, BollingerOutput};
pub use divergence::detect_divergence;
pub use ema::ema_series;
pub use macd::{Macd, MacdOutput};
pub use rsi::{Rsi, RsiOutput};
pub use sma::Sma;
pub use volume::{VolumeOutput, VolumeStats};

use crate::types::Bar;

/// Trait for implementing technical indicators.
pub trait Indicator {
    type Output;

    /// Unique identifier for this indicator.
    fn id(&self) -> &str;

    /// Minimum number of bars required for calculation.
    fn min_periods(&self) -> usize;

    /// Calculate from date-ascending bars.
    /// Returns None if insufficient data or calculation fails.
    fn calculate(&self, bars: &[Bar]) -> Option<Self::Output>;
}

/// Round to a fixed number of decimals.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// `Some(value)` only for finite values.
pub fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Percent change from `from` to `to`, `None` if `from` is not positive.
pub fn pct_change(from: f64, to: f64) -> Option<f64> {
    if from <= 0.0 {
        return None;
    }
    finite((to - from) / from * 100.0)
}

/// Wilder smoothing: seed with the mean of the first `period` values, then
/// `prev + (value - prev) / period`. Output index 0 lines up with input index
/// `period - 1`.
pub fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(values.len() - period + 1);
    let mut smoothed: f64 = values.iter().take(period).sum::<f64>() / period as f64;
    result.push(smoothed);

    for value in values.iter().skip(period) {
        smoothed = (smoothed * (period - 1) as f64 + value) / period as f64;
        result.push(smoothed);
    }

    result
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(12.345, 1), 12.3);
        assert_eq!(round_to(-0.123456, 4), -0.1235);
        assert_eq!(round_to(7.0, 2), 7.0);
    }

    #[test]
    fn test_finite_filters_nan_and_inf() {
        assert_eq!(finite(1.5), Some(1.5));
        assert_eq!(finite(f64::NAN), None);
        assert_eq!(finite(f64::INFINITY), None);
    }

    #[test]
    fn test_pct_change() {
        assert_eq!(pct_change(100.0, 110.0), Some(10.0));
        assert_eq!(pct_change(0.0, 110.0), None);
    }

    #[test]
    fn test_wilder_smooth_seed_and_recursion() {
        let values = [2.0, 4.0, 6.0, 8.0];
        let smoothed = wilder_smooth(&values, 3);
        assert_eq!(smoothed.len(), 2);
        assert!((smoothed[0] - 4.0).abs() < 1e-12);
        // (4 * 2 + 8) / 3
        assert!((smoothed[1] - 16.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_wilder_smooth_short_input() {
        assert!(wilder_smooth(&[1.0, 2.0], 3).is_empty());
        assert!(wilder_smooth(&[1.0, 2.0], 0).is_empty());
    }
}
