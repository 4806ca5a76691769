//! Average Directional Index (ADX) indicator.

use super::{finite, round_to, wilder_smooth, Indicator};
use crate::types::Bar;

/// ADX (Average Directional Index) indicator.
///
/// Measures trend strength (not direction):
/// - Below 20: Weak trend / ranging market
/// - 20-35: Trending
/// - Above 35: Strong trend
///
/// Combined with +DI and -DI for direction.
pub struct Adx {
    period: usize,
}

impl Default for Adx {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// Latest directional-movement readings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdxOutput {
    /// ADX, rounded to one decimal.
    pub adx: f64,
    pub plus_di: f64,
    pub minus_di: f64,
}

impl Adx {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// +DM and -DM for one bar. Negative movement is zeroed, and when both
    /// are positive the smaller one is zeroed.
    fn directional_movement(current: &Bar, previous: &Bar) -> (f64, f64) {
        let mut plus_dm = (current.high - previous.high).max(0.0);
        let mut minus_dm = (previous.low - current.low).max(0.0);
        if plus_dm > 0.0 && minus_dm > 0.0 {
            if plus_dm < minus_dm {
                plus_dm = 0.0;
            } else if minus_dm < plus_dm {
                minus_dm = 0.0;
            }
        }
        (plus_dm, minus_dm)
    }
}

impl Indicator for Adx {
    type Output = AdxOutput;

    fn id(&self) -> &str {
        "adx"
    }

    fn min_periods(&self) -> usize {
        30.max(self.period * 2)
    }

    fn calculate(&self, bars: &[Bar]) -> Option<AdxOutput> {
        if self.period == 0 || bars.len() < self.min_periods() {
            return None;
        }

        let mut plus_dm = Vec::with_capacity(bars.len() - 1);
        let mut minus_dm = Vec::with_capacity(bars.len() - 1);
        let mut tr = Vec::with_capacity(bars.len() - 1);

        for pair in bars.windows(2) {
            let (plus, minus) = Self::directional_movement(&pair[1], &pair[0]);
            plus_dm.push(plus);
            minus_dm.push(minus);
            tr.push(pair[1].true_range(&pair[0]));
        }

        let smoothed_plus_dm = wilder_smooth(&plus_dm, self.period);
        let smoothed_minus_dm = wilder_smooth(&minus_dm, self.period);
        let smoothed_tr = wilder_smooth(&tr, self.period);

        let mut plus_di = Vec::with_capacity(smoothed_tr.len());
        let mut minus_di = Vec::with_capacity(smoothed_tr.len());
        let mut dx_values = Vec::with_capacity(smoothed_tr.len());
        for i in 0..smoothed_tr.len() {
            let atr = smoothed_tr[i];
            let (plus, minus) = if atr > 0.0 {
                (
                    smoothed_plus_dm[i] / atr * 100.0,
                    smoothed_minus_dm[i] / atr * 100.0,
                )
            } else {
                (0.0, 0.0)
            };

            let mut di_sum = plus + minus;
            if di_sum == 0.0 {
                di_sum = 1.0;
            }
            dx_values.push((plus - minus).abs() / di_sum * 100.0);
            plus_di.push(plus);
            minus_di.push(minus);
        }

        let adx_values = wilder_smooth(&dx_values, self.period);

        Some(AdxOutput {
            adx: round_to(finite(*adx_values.last()?)?, 1),
            plus_di: round_to(finite(*plus_di.last()?)?, 1),
            minus_di: round_to(finite(*minus_di.last()?)?, 1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::indicators::fixtures::*;

    #[test]
    fn test_adx_min_periods() {
        let adx = Adx::default();
        assert_eq!(adx.id(), "adx");
        assert_eq!(adx.min_periods(), 30);
        assert!(adx.calculate(&create_uptrend_bars(29)).is_none());
        assert!(adx.calculate(&create_uptrend_bars(30)).is_some());
    }

    #[test]
    fn test_adx_strong_uptrend() {
        let output = Adx::default().calculate(&create_uptrend_bars(80)).unwrap();
        // Every bar: +DM = 1.5, -DM = 0
        assert!(output.plus_di > output.minus_di);
        assert_eq!(output.minus_di, 0.0);
        assert_eq!(output.adx, 100.0);
    }

    #[test]
    fn test_adx_downtrend_direction() {
        let output = Adx::default().calculate(&create_downtrend_bars(80)).unwrap();
        assert!(output.minus_di > output.plus_di);
        assert!(output.adx > 25.0);
    }

    #[test]
    fn test_adx_flat_is_zero() {
        let output = Adx::default().calculate(&create_flat_bars(40, 10.0)).unwrap();
        assert_eq!(output.adx, 0.0);
        assert_eq!(output.plus_di, 0.0);
        assert_eq!(output.minus_di, 0.0);
    }

    #[test]
    fn test_adx_range_bound_is_weak() {
        let output = Adx::default()
            .calculate(&create_oscillating_bars(200, 3.0, 6.0))
            .unwrap();
        assert!((0.0..=100.0).contains(&output.adx));
        assert!(output.adx < 35.0, "choppy series should not read as strong, got {}", output.adx);
    }

    #[test]
    fn test_directional_movement_rules() {
        let prev = Bar {
            date: day(0),
            open: 10.0,
            high: 11.0,
            low: 9.0,
            close: 10.0,
            volume: 0.0,
        };
        // Outside bar, larger down move wins
        let outside = Bar { high: 11.5, low: 8.0, ..prev };
        assert_eq!(Adx::directional_movement(&outside, &prev), (0.0, 1.0));
        // Inside bar: both negative -> zero
        let inside = Bar { high: 10.5, low: 9.5, ..prev };
        assert_eq!(Adx::directional_movement(&inside, &prev), (0.0, 0.0));
    }
}
