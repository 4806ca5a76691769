//! Relative Strength Index (RSI) indicator.

use super::{finite, round_to, Indicator};
use crate::types::Bar;

/// RSI below this counts as having touched an extreme.
pub const RSI_EXTREME_LOW: f64 = 35.0;
/// RSI above this counts as having touched an extreme.
pub const RSI_EXTREME_HIGH: f64 = 65.0;

/// RSI (Relative Strength Index) indicator.
///
/// Measures momentum by comparing the magnitude of recent gains to recent losses,
/// each smoothed with Wilder's method (alpha = 1/period). Values range from 0-100.
/// A flat series reads 50.
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// Full RSI history plus the latest reading.
#[derive(Debug, Clone, PartialEq)]
pub struct RsiOutput {
    /// One entry per input bar; `None` during warm-up.
    pub series: Vec<Option<f64>>,
    /// Latest RSI, rounded to one decimal.
    pub value: f64,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            if avg_gain == 0.0 {
                return 50.0;
            }
            return 100.0;
        }
        let rs = avg_gain / avg_loss;
        100.0 - (100.0 / (1.0 + rs))
    }

    /// RSI value for every bar, aligned with the input.
    pub fn series(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        let mut series = vec![None; bars.len()];
        if self.period == 0 || bars.len() < self.period + 1 {
            return series;
        }

        let mut gains = Vec::with_capacity(bars.len() - 1);
        let mut losses = Vec::with_capacity(bars.len() - 1);
        for pair in bars.windows(2) {
            let change = pair[1].close - pair[0].close;
            if change > 0.0 {
                gains.push(change);
                losses.push(0.0);
            } else {
                gains.push(0.0);
                losses.push(-change);
            }
        }

        let period = self.period as f64;
        let mut avg_gain: f64 = gains.iter().take(self.period).sum::<f64>() / period;
        let mut avg_loss: f64 = losses.iter().take(self.period).sum::<f64>() / period;
        series[self.period] = finite(Self::rsi_from_averages(avg_gain, avg_loss));

        for i in self.period..gains.len() {
            avg_gain = (avg_gain * (period - 1.0) + gains[i]) / period;
            avg_loss = (avg_loss * (period - 1.0) + losses[i]) / period;
            // gains[i] is the move into bar i + 1
            series[i + 1] = finite(Self::rsi_from_averages(avg_gain, avg_loss));
        }

        series
    }
}

impl Indicator for Rsi {
    type Output = RsiOutput;

    fn id(&self) -> &str {
        "rsi"
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn calculate(&self, bars: &[Bar]) -> Option<RsiOutput> {
        let series = self.series(bars);
        let latest = (*series.last()?)?;
        Some(RsiOutput {
            series,
            value: round_to(latest, 1),
        })
    }
}

impl RsiOutput {
    fn valid(&self) -> Vec<f64> {
        self.series.iter().flatten().copied().collect()
    }

    /// Latest RSI minus the RSI `bars_back` bars earlier, rounded to one decimal.
    pub fn delta(&self, bars_back: usize) -> Option<f64> {
        let valid = self.valid();
        if valid.len() < bars_back + 1 {
            return None;
        }
        let earlier = valid[valid.len() - 1 - bars_back];
        finite(round_to(self.value - earlier, 1))
    }

    /// RSI range over the trailing `window` readings and whether any of them
    /// went below 35 or above 65.
    pub fn range_quality(&self, window: usize) -> Option<(f64, bool)> {
        let valid = self.valid();
        if window == 0 || valid.len() < window {
            return None;
        }
        let recent = &valid[valid.len() - window..];
        let max = recent.iter().copied().fold(f64::MIN, f64::max);
        let min = recent.iter().copied().fold(f64::MAX, f64::min);
        let had_extreme = recent
            .iter()
            .any(|&r| r < RSI_EXTREME_LOW || r > RSI_EXTREME_HIGH);
        Some((round_to(max - min, 1), had_extreme))
    }
}
