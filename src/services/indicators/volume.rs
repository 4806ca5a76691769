//! Daily volume statistics.

use super::{finite, round_to, Indicator};
use crate::types::Bar;

/// Trailing average volume and today's volume relative to it.
///
/// A latest bar below 10% of the average is treated as a still-forming
/// session and the previous bar's volume is used instead. Non-finite
/// volumes count as missing.
pub struct VolumeStats {
    period: usize,
    partial_day_ratio: f64,
}

impl Default for VolumeStats {
    fn default() -> Self {
        Self {
            period: 20,
            partial_day_ratio: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeOutput {
    pub avg_volume: f64,
    /// Latest volume, or the prior bar's when the latest looks partial.
    pub volume_today: f64,
    /// `volume_today / avg_volume`, two decimals; 0 when the average is 0.
    pub volume_ratio: f64,
}

impl Indicator for VolumeStats {
    type Output = VolumeOutput;

    fn id(&self) -> &str {
        "volume"
    }

    fn min_periods(&self) -> usize {
        1
    }

    fn calculate(&self, bars: &[Bar]) -> Option<VolumeOutput> {
        let latest = bars.last()?;

        // Non-finite rows are left out of the average
        let avg_volume = if self.period > 0 && bars.len() >= self.period {
            let window: Vec<f64> = bars
                .iter()
                .rev()
                .take(self.period)
                .filter_map(|b| finite(b.volume))
                .collect();
            if window.is_empty() {
                0.0
            } else {
                finite(window.iter().sum::<f64>() / window.len() as f64).unwrap_or(0.0)
            }
        } else {
            0.0
        };

        let previous = bars.len().checked_sub(2).map(|i| bars[i].volume);
        let volume_today = match finite(latest.volume) {
            Some(v) if avg_volume > 0.0 && v < avg_volume * self.partial_day_ratio => {
                previous.and_then(finite).unwrap_or(v)
            }
            Some(v) => v,
            None => previous.and_then(finite).unwrap_or(0.0),
        };

        let volume_ratio = if avg_volume > 0.0 {
            finite(round_to(volume_today / avg_volume, 2)).unwrap_or(0.0)
        } else {
            0.0
        };

        Some(VolumeOutput {
            avg_volume,
            volume_today,
            volume_ratio,
        })
    }
}
