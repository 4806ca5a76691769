//! Dual-sided setup scoring.
//!
//! LONG and SHORT are scored independently from the same snapshot. Both reward
//! trading with the 200-day trend: LONG looks for an uptrend, a pullback and
//! momentum resuming; SHORT for a downtrend, a bounce and momentum fading.
//! Oversold/overbought extremes against the trend are penalised, not rewarded.
//!
//! Weight buckets (approximate max):
//!   Trend alignment (SMA200)     15  (wrong side subtracts 15)
//!   SMA50 pullback/rejection     12
//!   RSI zone                     12, delta 8, divergence 5
//!   MACD confirmation            13
//!   ATR% volatility              18
//!   ADX trend strength           10  (below 20 subtracts 2)
//!   Directional volume            8
//!   Bollinger squeeze             5
//!   Extras (SI, analyst, 5d)      7

pub mod long;
pub mod short;

pub use long::score_long;
pub use short::score_short;

use crate::types::{ScoreResult, Side, TechnicalSnapshot};

/// Signals shown per candidate in compact output.
pub const DISPLAY_SIGNALS: usize = 4;

/// Score one side.
pub fn score(side: Side, snapshot: &TechnicalSnapshot) -> ScoreResult {
    match side {
        Side::Long => score_long(snapshot),
        Side::Short => score_short(snapshot),
    }
}

/// Running total plus the labels of the rules that fired, in order.
#[derive(Debug, Default)]
struct ScoreCard {
    total: i32,
    signals: Vec<String>,
}

impl ScoreCard {
    fn add(&mut self, points: i32) {
        self.total += points;
    }

    fn add_signal(&mut self, points: i32, label: impl Into<String>) {
        self.total += points;
        self.signals.push(label.into());
    }

    fn finish(self) -> ScoreResult {
        ScoreResult {
            score: self.total.clamp(0, 100) as u8,
            signals: self.signals,
        }
    }
}

/// ATR% volatility. Direction-agnostic: leveraged products need movement.
fn score_volatility(card: &mut ScoreCard, snapshot: &TechnicalSnapshot) {
    let Some(atr) = snapshot.atr_pct else {
        return;
    };
    if atr >= 5.0 {
        card.add_signal(18, format!("ATR {:.1}%", atr));
    } else if atr >= 3.5 {
        card.add_signal(14, format!("ATR {:.1}%", atr));
    } else if atr >= 2.5 {
        card.add(9);
    } else if atr >= 1.5 {
        card.add(4);
    }
}

/// ADX trend strength. A ranging market costs points on both sides.
fn score_trend_strength(card: &mut ScoreCard, snapshot: &TechnicalSnapshot) {
    let Some(adx) = snapshot.adx else {
        return;
    };
    if adx >= 35.0 {
        card.add_signal(10, format!("ADX {:.0} strong", adx));
    } else if adx >= 25.0 {
        card.add_signal(7, format!("ADX {:.0}", adx));
    } else if adx >= 20.0 {
        card.add(3);
    } else {
        card.add(-2);
    }
}

/// Bollinger squeeze: tight bands in a trending market precede breakouts.
fn score_squeeze(card: &mut ScoreCard, snapshot: &TechnicalSnapshot) {
    let (Some(width_pct), Some(_)) = (snapshot.bb_width_percentile, snapshot.bb_position) else {
        return;
    };
    let trending = snapshot.adx.is_some_and(|adx| adx >= 20.0);
    if width_pct < 15.0 && trending {
        card.add_signal(5, "BB squeeze");
    } else if width_pct < 25.0 {
        card.add(2);
    }
}
