//! LONG setup scoring: uptrend + pullback + momentum resuming.

use super::{score_squeeze, score_trend_strength, score_volatility, ScoreCard};
use crate::types::{AnalystRating, MacdDirection, RsiDivergence, ScoreResult, TechnicalSnapshot};

/// Score LONG potential, 0-100.
pub fn score_long(snapshot: &TechnicalSnapshot) -> ScoreResult {
    let mut card = ScoreCard::default();
    let rsi = snapshot.rsi;
    let dist200 = snapshot.sma200_distance_pct;
    let in_uptrend = dist200.is_some_and(|d| d >= 0.0);

    // Trend alignment. Below SMA200 there is no long setup.
    if let Some(dist200) = dist200 {
        if dist200 < 0.0 {
            card.add_signal(-15, "Below SMA200");
        } else if dist200 <= 5.0 {
            card.add_signal(15, "Uptrend near SMA200");
        } else if dist200 <= 15.0 {
            card.add_signal(12, "Uptrend");
        } else if dist200 <= 30.0 {
            card.add(8);
        } else {
            card.add(4);
        }
    }

    // Entry timing: pulled back to SMA50 inside the uptrend
    if let (Some(dist50), true) = (snapshot.sma50_distance_pct, in_uptrend) {
        if (-3.0..=1.0).contains(&dist50) {
            card.add_signal(12, "SMA50 pullback");
        } else if (-5.0..=3.0).contains(&dist50) {
            card.add_signal(8, "Near SMA50");
        } else if dist50 > 3.0 {
            card.add(4);
        }
    }

    // RSI zone: cooled off, not oversold (falling knife) or overbought (late)
    if (35.0..=45.0).contains(&rsi) {
        card.add_signal(12, format!("RSI {:.0} pullback zone", rsi));
    } else if rsi > 45.0 && rsi <= 55.0 {
        card.add_signal(10, format!("RSI {:.0} neutral", rsi));
    } else if (30.0..35.0).contains(&rsi) {
        card.add_signal(6, format!("RSI {:.0} low", rsi));
    } else if rsi > 55.0 && rsi <= 65.0 {
        card.add(5);
    } else if rsi > 70.0 {
        card.add(-5);
    } else if rsi < 30.0 {
        card.add(-8);
    }

    if let Some(delta) = snapshot.rsi_delta {
        if delta > 5.0 && (30.0..=55.0).contains(&rsi) {
            card.add_signal(8, format!("RSI turning +{:.0}", delta));
        } else if delta > 3.0 && rsi <= 55.0 {
            card.add(5);
        } else if delta > 0.0 {
            card.add(2);
        } else if delta < -5.0 {
            card.add(-3);
        }
    }

    if snapshot.rsi_divergence == RsiDivergence::Bullish && in_uptrend {
        card.add_signal(5, "Bullish divergence");
    }

    if let (Some(current), Some(previous)) = (snapshot.macd_hist, snapshot.macd_hist_prev) {
        let increasing = snapshot.macd_hist_direction == Some(MacdDirection::Increasing);
        if previous < 0.0 && current > 0.0 {
            card.add_signal(10, "MACD cross up");
        } else if current > 0.0 && increasing {
            card.add_signal(8, "MACD rising");
        } else if current > 0.0 {
            card.add(5);
        } else if previous < 0.0 && current < 0.0 && increasing {
            // Converging from below
            card.add(3);
        }
    }

    score_volatility(&mut card, snapshot);
    score_trend_strength(&mut card, snapshot);

    // Volume only counts when it backs an up day; heavy volume on a red day is distribution
    let ratio = snapshot.volume_ratio;
    let change = snapshot.change_pct;
    if ratio >= 2.5 && change > 0.0 {
        card.add_signal(8, format!("Volume {:.1}x", ratio));
    } else if ratio >= 1.5 && change > 0.0 {
        card.add(5);
    } else if ratio >= 1.5 && change < -1.0 {
        card.add(-3);
    }

    score_squeeze(&mut card, snapshot);

    // Extras. Short interest is squeeze fuel for a long.
    if let Some(short_pct) = snapshot.short_pct_of_float {
        if short_pct >= 0.20 {
            card.add_signal(4, format!("Short interest {:.0}%", short_pct * 100.0));
        } else if short_pct >= 0.10 {
            card.add(2);
        }
    }

    match snapshot.analyst_rating {
        Some(AnalystRating::StrongBuy) => card.add(3),
        Some(AnalystRating::Buy) => card.add(2),
        _ => {}
    }

    if let (Some(change_5d), true) = (snapshot.change_5d_pct, in_uptrend) {
        if (-8.0..=-2.0).contains(&change_5d) {
            card.add_signal(5, "5d pullback in uptrend");
        }
    }

    card.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::scoring::fixtures::*;

    #[test]
    fn test_uptrend_pullback_scores_high() {
        let result = score_long(&uptrend_pullback());
        // 15 + 12 + 12 + 8 + 14 + 7
        assert_eq!(result.score, 68);
        assert_eq!(
            result.signals,
            vec![
                "Uptrend near SMA200",
                "SMA50 pullback",
                "RSI 40 pullback zone",
                "RSI turning +6",
                "ATR 4.0%",
                "ADX 30",
            ]
        );
    }

    #[test]
    fn test_below_sma200_penalised() {
        let result = score_long(&downtrend_bounce());
        assert!(result.score < 25, "got {}", result.score);
        assert_eq!(result.signals.first().map(String::as_str), Some("Below SMA200"));
    }

    #[test]
    fn test_falling_knife_not_rewarded() {
        let mut s = empty(24.0);
        s.sma200_distance_pct = Some(-12.0);
        s.rsi_delta = Some(-7.0);
        assert_eq!(score_long(&s).score, 0);
    }

    #[test]
    fn test_all_null_fields_neutral() {
        // Only the RSI bucket can fire
        let result = score_long(&empty(40.0));
        assert_eq!(result.score, 12);
        assert_eq!(result.signals, vec!["RSI 40 pullback zone"]);
    }

    #[test]
    fn test_overbought_costs_points() {
        assert_eq!(score_long(&empty(75.0)).score, 0);
        assert_eq!(score_long(&empty(68.0)).score, 0);
        assert_eq!(score_long(&empty(60.0)).score, 5);
    }

    #[test]
    fn test_macd_cross_up() {
        let mut s = empty(50.0);
        s.macd_hist = Some(0.12);
        s.macd_hist_prev = Some(-0.05);
        s.macd_hist_direction = Some(MacdDirection::Increasing);
        let result = score_long(&s);
        assert_eq!(result.score, 20);
        assert!(result.has_signal("MACD cross up"));
    }

    #[test]
    fn test_macd_converging_from_below() {
        let mut s = empty(50.0);
        s.macd_hist = Some(-0.05);
        s.macd_hist_prev = Some(-0.12);
        s.macd_hist_direction = Some(MacdDirection::Increasing);
        assert_eq!(score_long(&s).score, 13);
    }

    #[test]
    fn test_volume_on_red_day_is_distribution() {
        let mut s = empty(50.0);
        s.volume_ratio = 2.0;
        s.change_pct = -2.5;
        assert_eq!(score_long(&s).score, 7);

        s.change_pct = 1.2;
        s.volume_ratio = 3.0;
        let result = score_long(&s);
        assert_eq!(result.score, 18);
        assert!(result.has_signal("Volume 3.0x"));
    }

    #[test]
    fn test_divergence_requires_uptrend() {
        let mut s = empty(50.0);
        s.rsi_divergence = RsiDivergence::Bullish;
        assert_eq!(score_long(&s).score, 10);

        s.sma200_distance_pct = Some(8.0);
        let result = score_long(&s);
        // 12 trend + 10 rsi + 5 divergence
        assert_eq!(result.score, 27);
        assert!(result.has_signal("Bullish divergence"));
    }

    #[test]
    fn test_enrichment_extras() {
        let mut s = uptrend_pullback();
        let before = score_long(&s).score;
        s.short_pct_of_float = Some(0.22);
        s.analyst_rating = Some(AnalystRating::StrongBuy);
        s.change_5d_pct = Some(-4.0);
        let result = score_long(&s);
        assert_eq!(result.score, before + 4 + 3 + 5);
        assert!(result.has_signal("Short interest 22%"));
        assert!(result.has_signal("5d pullback in uptrend"));
    }

    #[test]
    fn test_score_never_exceeds_hundred() {
        let mut s = uptrend_pullback();
        s.atr_pct = Some(7.0);
        s.adx = Some(40.0);
        s.macd_hist = Some(0.3);
        s.macd_hist_prev = Some(-0.1);
        s.macd_hist_direction = Some(MacdDirection::Increasing);
        s.rsi_divergence = RsiDivergence::Bullish;
        s.volume_ratio = 3.0;
        s.change_pct = 2.0;
        s.bb_width_percentile = Some(5.0);
        s.bb_position = Some(0.6);
        s.short_pct_of_float = Some(0.3);
        s.analyst_rating = Some(AnalystRating::StrongBuy);
        s.change_5d_pct = Some(-3.0);
        assert_eq!(score_long(&s).score, 100);
    }
}
