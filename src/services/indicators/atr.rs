//! Average True Range (ATR) indicator.

use super::{finite, round_to, Indicator};
use crate::types::Bar;

/// ATR% (Average True Range as a percentage of price).
///
/// TR = max(High-Low, |High-PrevClose|, |Low-PrevClose|). The screener uses a
/// plain mean of the last `period` true ranges, divided by the latest close.
/// Higher values mean more room for leveraged instruments to move.
pub struct Atr {
    period: usize,
}

impl Default for Atr {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Atr {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for Atr {
    type Output = f64;

    fn id(&self) -> &str {
        "atr_pct"
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn calculate(&self, bars: &[Bar]) -> Option<f64> {
        if self.period == 0 || bars.len() < self.min_periods() {
            return None;
        }

        let recent = &bars[bars.len() - self.min_periods()..];
        let total: f64 = recent
            .windows(2)
            .map(|pair| pair[1].true_range(&pair[0]))
            .sum();
        let atr = total / self.period as f64;

        let current_price = recent.last()?.close;
        if current_price <= 0.0 {
            return None;
        }
        finite(round_to(atr / current_price * 100.0, 2))
    }
}
