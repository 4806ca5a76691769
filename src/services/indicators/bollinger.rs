//! Bollinger Bands indicator.

use super::{finite, round_to, Indicator};
use crate::types::Bar;

/// Bollinger Bands indicator.
///
/// Consists of:
/// - Middle band: SMA(20)
/// - Upper band: SMA + 2 * StdDev
/// - Lower band: SMA - 2 * StdDev
///
/// Reports where today's band width ranks among the trailing sessions (low =
/// squeeze) and where price sits inside the band (%B; below 0 or above 1 on a
/// breakout).
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
    lookback: usize,
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: 2.0,
            lookback: 120,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerOutput {
    /// Share of trailing widths strictly below today's, 0-100, one decimal.
    pub width_percentile: Option<f64>,
    /// `(price - lower) / (upper - lower)`, two decimals. `None` when the band has no width.
    pub position: Option<f64>,
}

impl BollingerBands {
    /// Sample standard deviation (n - 1).
    fn std_dev(values: &[f64], mean: f64) -> f64 {
        if values.len() < 2 {
            return 0.0;
        }
        let variance: f64 =
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
        variance.sqrt()
    }

    /// (lower, upper, relative width) for the window ending at each bar.
    fn bands(&self, closes: &[f64]) -> Vec<(f64, f64, Option<f64>)> {
        closes
            .windows(self.period)
            .map(|window| {
                let middle = window.iter().sum::<f64>() / self.period as f64;
                let std_dev = Self::std_dev(window, middle);
                let upper = middle + self.std_dev_multiplier * std_dev;
                let lower = middle - self.std_dev_multiplier * std_dev;
                let width = if middle != 0.0 {
                    finite((upper - lower) / middle)
                } else {
                    None
                };
                (lower, upper, width)
            })
            .collect()
    }
}

impl Indicator for BollingerBands {
    type Output = BollingerOutput;

    fn id(&self) -> &str {
        "bollinger"
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, bars: &[Bar]) -> Option<BollingerOutput> {
        if self.period < 2 || bars.len() < self.period {
            return None;
        }

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let bands = self.bands(&closes);
        let &(lower, upper, current_width) = bands.last()?;

        let width_percentile = current_width.and_then(|current| {
            let widths: Vec<f64> = bands.iter().filter_map(|b| b.2).collect();
            let recent = &widths[widths.len().saturating_sub(self.lookback)..];
            if recent.is_empty() {
                return None;
            }
            let below = recent.iter().filter(|&&w| w < current).count();
            finite(round_to(below as f64 / recent.len() as f64 * 100.0, 1))
        });

        let current_price = *closes.last()?;
        let band_range = upper - lower;
        let position = if band_range > 0.0 {
            finite(round_to((current_price - lower) / band_range, 2))
        } else {
            None
        };

        Some(BollingerOutput {
            width_percentile,
            position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::indicators::fixtures::*;

    #[test]
    fn test_bollinger_insufficient_data() {
        let bb = BollingerBands::default();
        assert_eq!(bb.id(), "bollinger");
        assert!(bb.calculate(&create_uptrend_bars(19)).is_none());
        assert!(bb.calculate(&create_uptrend_bars(20)).is_some());
    }

    #[test]
    fn test_bollinger_flat_has_no_position() {
        let output = BollingerBands::default()
            .calculate(&create_flat_bars(40, 10.0))
            .unwrap();
        assert_eq!(output.position, None);
        // All widths are zero: nothing strictly below today
        assert_eq!(output.width_percentile, Some(0.0));
    }

    #[test]
    fn test_bollinger_squeeze_after_volatility() {
        // Wild swings, then a quiet stretch: today's width ranks near the bottom.
        let wave = |i: usize| (i as f64 * std::f64::consts::TAU / 10.0).sin();
        let mut closes: Vec<f64> = (0..100).map(|i| 100.0 + 10.0 * wave(i)).collect();
        closes.extend((100..140).map(|i| {
            let fading = 2.0 * (1.0 - (i - 100) as f64 / 45.0);
            100.0 + fading * wave(i)
        }));
        let output = BollingerBands::default()
            .calculate(&bars_from_closes(&closes))
            .unwrap();
        assert!(output.width_percentile.unwrap() < 15.0);
    }

    #[test]
    fn test_bollinger_breakout_position_above_one() {
        let mut closes = vec![100.0, 101.0, 100.0, 99.0, 100.0];
        closes = closes.iter().cycle().take(40).copied().collect();
        closes.push(115.0);
        let output = BollingerBands::default()
            .calculate(&bars_from_closes(&closes))
            .unwrap();
        assert!(output.position.unwrap() > 1.0);
    }

    #[test]
    fn test_sample_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let sd = BollingerBands::std_dev(&values, 5.0);
        assert!((sd - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }
}
