//! MACD (Moving Average Convergence Divergence) indicator.

use super::{ema_series, finite, round_to, Indicator};
use crate::types::{Bar, MacdDirection};

/// MACD indicator.
///
/// Shows the relationship between two EMAs:
/// - MACD Line = EMA(12) - EMA(26)
/// - Signal Line = EMA(9) of MACD Line
/// - Histogram = MACD Line - Signal Line
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

/// Latest histogram state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdOutput {
    /// Current histogram, rounded to 4 decimals.
    pub histogram: f64,
    /// Previous bar's histogram, rounded to 4 decimals.
    pub histogram_prev: f64,
    pub direction: MacdDirection,
    /// The MACD/signal gap shrank versus the prior bar.
    pub converging: bool,
}

impl Indicator for Macd {
    type Output = MacdOutput;

    fn id(&self) -> &str {
        "macd"
    }

    fn min_periods(&self) -> usize {
        self.slow_period + self.signal_period
    }

    fn calculate(&self, bars: &[Bar]) -> Option<MacdOutput> {
        if bars.len() < self.min_periods() {
            return None;
        }

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let fast_ema = ema_series(&closes, self.fast_period);
        let slow_ema = ema_series(&closes, self.slow_period);

        let macd_line: Vec<f64> = fast_ema
            .iter()
            .zip(slow_ema.iter())
            .map(|(f, s)| f - s)
            .collect();
        let signal_line = ema_series(&macd_line, self.signal_period);

        let n = macd_line.len();
        let gap = finite(macd_line[n - 1] - signal_line[n - 1])?;
        let gap_prev = finite(macd_line[n - 2] - signal_line[n - 2])?;

        let histogram = round_to(gap, 4);
        let histogram_prev = round_to(gap_prev, 4);
        let direction = if histogram > histogram_prev {
            MacdDirection::Increasing
        } else {
            MacdDirection::Decreasing
        };

        Some(MacdOutput {
            histogram,
            histogram_prev,
            direction,
            converging: gap.abs() < gap_prev.abs(),
        })
    }
}
