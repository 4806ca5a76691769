//! Hard gate: pass/fail admission before any scoring.

use crate::types::TechnicalSnapshot;

/// Minimum 20-day average volume for a tradable symbol.
pub const MIN_AVG_VOLUME: f64 = 100_000.0;

/// Minimum RSI range over 20 bars; below this the symbol is drifting, not oscillating.
pub const MIN_RSI_RANGE: f64 = 15.0;

/// Liquidity and oscillation-quality thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HardGate {
    pub min_avg_volume: f64,
    pub min_rsi_range: f64,
}

impl Default for HardGate {
    fn default() -> Self {
        Self {
            min_avg_volume: MIN_AVG_VOLUME,
            min_rsi_range: MIN_RSI_RANGE,
        }
    }
}

impl HardGate {
    pub fn new(min_avg_volume: f64, min_rsi_range: f64) -> Self {
        Self {
            min_avg_volume,
            min_rsi_range,
        }
    }

    /// Whether a symbol is admitted to scoring.
    ///
    /// A missing snapshot, a non-positive price or an undefined RSI always fails.
    /// Index futures skip the liquidity and oscillation checks. Everyone else needs
    /// enough average volume and, when the 20-bar RSI range is known, a range of
    /// at least 15 that touched an extreme (below 35 or above 65).
    pub fn passes(
        &self,
        _symbol: &str,
        snapshot: Option<&TechnicalSnapshot>,
        is_index_future: bool,
    ) -> bool {
        let Some(snapshot) = snapshot else {
            return false;
        };
        if !snapshot.price.is_finite() || snapshot.price <= 0.0 || !snapshot.rsi.is_finite() {
            return false;
        }
        if is_index_future {
            return true;
        }
        if snapshot.avg_volume_20d < self.min_avg_volume {
            return false;
        }
        if let Some(range) = snapshot.rsi_range_20d {
            if range < self.min_rsi_range || !snapshot.rsi_had_extreme_20d {
                return false;
            }
        }
        true
    }

    /// Keep the snapshots that pass, preserving order.
    pub fn retain(&self, snapshots: Vec<TechnicalSnapshot>) -> Vec<TechnicalSnapshot> {
        snapshots
            .into_iter()
            .filter(|s| self.passes(&s.symbol, Some(s), s.is_index_future))
            .collect()
    }
}

/// Hard gate with the default thresholds.
pub fn passes_hard_gate(
    symbol: &str,
    snapshot: Option<&TechnicalSnapshot>,
    is_index_future: bool,
) -> bool {
    HardGate::default().passes(symbol, snapshot, is_index_future)
}
