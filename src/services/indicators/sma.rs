//! Simple Moving Average (SMA) indicator.

use super::{finite, round_to, Indicator};
use crate::types::Bar;

/// SMA (Simple Moving Average) of closes over the trailing `period` bars,
/// rounded to two decimals.
pub struct Sma {
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Percent distance of `price` from `sma`.
    pub fn distance_pct(price: f64, sma: f64) -> Option<f64> {
        if sma <= 0.0 {
            return None;
        }
        finite(round_to((price - sma) / sma * 100.0, 2))
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn id(&self) -> &str {
        match self.period {
            50 => "sma50",
            200 => "sma200",
            _ => "sma",
        }
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, bars: &[Bar]) -> Option<f64> {
        if self.period == 0 || bars.len() < self.period {
            return None;
        }

        let sma: f64 = bars
            .iter()
            .rev()
            .take(self.period)
            .map(|b| b.close)
            .sum::<f64>()
            / self.period as f64;

        finite(round_to(sma, 2))
    }
}
