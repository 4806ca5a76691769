//! SHORT setup scoring: downtrend + bounce into resistance + momentum fading.

use super::{score_squeeze, score_trend_strength, score_volatility, ScoreCard};
use crate::types::{AnalystRating, MacdDirection, RsiDivergence, ScoreResult, TechnicalSnapshot};

/// Score SHORT potential, 0-100.
pub fn score_short(snapshot: &TechnicalSnapshot) -> ScoreResult {
    let mut card = ScoreCard::default();
    let rsi = snapshot.rsi;
    let dist200 = snapshot.sma200_distance_pct;
    let in_downtrend = dist200.is_some_and(|d| d < 0.0);

    // Trend alignment. Above SMA200 there is no short setup; exactly on it scores nothing.
    if let Some(dist200) = dist200 {
        if dist200 > 0.0 {
            card.add_signal(-15, "Above SMA200");
        } else if (-5.0..0.0).contains(&dist200) {
            card.add_signal(15, "Downtrend near SMA200");
        } else if (-15.0..-5.0).contains(&dist200) {
            card.add_signal(12, "Downtrend");
        } else if (-30.0..-15.0).contains(&dist200) {
            card.add(8);
        } else if dist200 < -30.0 {
            card.add(4);
        }
    }

    // Entry timing: bounced up into SMA50 inside the downtrend
    if let (Some(dist50), true) = (snapshot.sma50_distance_pct, in_downtrend) {
        if (-1.0..=3.0).contains(&dist50) {
            card.add_signal(12, "SMA50 rejection");
        } else if (-3.0..=5.0).contains(&dist50) {
            card.add_signal(8, "Near SMA50");
        } else if dist50 < -3.0 {
            card.add(4);
        }
    }

    // RSI zone: bounced, not oversold (late) or extreme (strong momentum)
    if (55.0..=65.0).contains(&rsi) {
        card.add_signal(12, format!("RSI {:.0} bounce zone", rsi));
    } else if (50.0..55.0).contains(&rsi) {
        card.add_signal(10, format!("RSI {:.0} neutral", rsi));
    } else if rsi > 65.0 && rsi <= 70.0 {
        card.add_signal(6, format!("RSI {:.0} high", rsi));
    } else if (40.0..50.0).contains(&rsi) {
        card.add(5);
    } else if rsi < 30.0 {
        card.add(-5);
    } else if rsi > 75.0 {
        card.add(-8);
    }

    if let Some(delta) = snapshot.rsi_delta {
        if delta < -5.0 && (45.0..=70.0).contains(&rsi) {
            card.add_signal(8, format!("RSI falling {:.0}", delta));
        } else if delta < -3.0 && rsi >= 45.0 {
            card.add(5);
        } else if delta < 0.0 {
            card.add(2);
        } else if delta > 5.0 {
            card.add(-3);
        }
    }

    if snapshot.rsi_divergence == RsiDivergence::Bearish && in_downtrend {
        card.add_signal(5, "Bearish divergence");
    }

    if let (Some(current), Some(previous)) = (snapshot.macd_hist, snapshot.macd_hist_prev) {
        let decreasing = snapshot.macd_hist_direction == Some(MacdDirection::Decreasing);
        if previous > 0.0 && current < 0.0 {
            card.add_signal(10, "MACD cross down");
        } else if current < 0.0 && decreasing {
            card.add_signal(8, "MACD falling");
        } else if current < 0.0 {
            card.add(5);
        } else if previous > 0.0 && current > 0.0 && decreasing {
            // Converging from above
            card.add(3);
        }
    }

    score_volatility(&mut card, snapshot);
    score_trend_strength(&mut card, snapshot);

    // Heavy volume on a green day is accumulation
    let ratio = snapshot.volume_ratio;
    let change = snapshot.change_pct;
    if ratio >= 2.5 && change < 0.0 {
        card.add_signal(8, format!("Volume {:.1}x", ratio));
    } else if ratio >= 1.5 && change < 0.0 {
        card.add(5);
    } else if ratio >= 1.5 && change > 1.0 {
        card.add(-3);
    }

    score_squeeze(&mut card, snapshot);

    // Extras. A crowded short carries squeeze risk; unknown interest counts for nothing.
    if let Some(short_pct) = snapshot.short_pct_of_float {
        if short_pct >= 0.25 {
            card.add(-5);
        } else if short_pct >= 0.15 {
            card.add(-2);
        } else if short_pct < 0.05 {
            card.add(2);
        }
    }

    match snapshot.analyst_rating {
        Some(AnalystRating::Sell) | Some(AnalystRating::StrongSell) => card.add(3),
        Some(AnalystRating::Underperform) => card.add(2),
        _ => {}
    }

    if let (Some(change_5d), true) = (snapshot.change_5d_pct, in_downtrend) {
        if (2.0..=8.0).contains(&change_5d) {
            card.add_signal(5, "5d bounce in downtrend");
        }
    }

    card.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::scoring::fixtures::*;

    #[test]
    fn test_downtrend_bounce_scores_high() {
        let result = score_short(&downtrend_bounce());
        // 15 + 12 + 12 + 8 + 14 + 7
        assert_eq!(result.score, 68);
        assert_eq!(
            result.signals,
            vec![
                "Downtrend near SMA200",
                "SMA50 rejection",
                "RSI 60 bounce zone",
                "RSI falling -6",
                "ATR 4.0%",
                "ADX 30",
            ]
        );
    }

    #[test]
    fn test_above_sma200_penalised() {
        let result = score_short(&uptrend_pullback());
        // -15 + 5 - 3 + 14 + 7
        assert_eq!(result.score, 8);
        assert_eq!(result.signals.first().map(String::as_str), Some("Above SMA200"));
    }

    #[test]
    fn test_exactly_on_sma200_is_neutral() {
        let mut s = empty(45.0);
        s.sma200_distance_pct = Some(0.0);
        s.sma50_distance_pct = Some(0.5);
        assert_eq!(score_short(&s).score, 5);
    }

    #[test]
    fn test_overbought_in_uptrend_suppressed() {
        let mut s = empty(82.0);
        s.sma200_distance_pct = Some(18.0);
        s.rsi_delta = Some(9.0);
        assert_eq!(score_short(&s).score, 0);
    }

    #[test]
    fn test_all_null_fields_neutral() {
        let result = score_short(&empty(60.0));
        assert_eq!(result.score, 12);
        assert_eq!(result.signals, vec!["RSI 60 bounce zone"]);
        assert_eq!(score_short(&empty(72.0)).score, 0);
    }

    #[test]
    fn test_macd_cross_down() {
        let mut s = empty(52.0);
        s.macd_hist = Some(-0.08);
        s.macd_hist_prev = Some(0.03);
        s.macd_hist_direction = Some(MacdDirection::Decreasing);
        let result = score_short(&s);
        assert_eq!(result.score, 20);
        assert!(result.has_signal("MACD cross down"));
    }

    #[test]
    fn test_volume_on_green_day_is_accumulation() {
        let mut s = empty(52.0);
        s.volume_ratio = 1.8;
        s.change_pct = 2.0;
        assert_eq!(score_short(&s).score, 7);

        s.volume_ratio = 2.6;
        s.change_pct = -3.0;
        assert!(score_short(&s).has_signal("Volume 2.6x"));
    }

    #[test]
    fn test_short_interest_only_when_known() {
        let base = score_short(&downtrend_bounce()).score;

        let mut s = downtrend_bounce();
        s.short_pct_of_float = Some(0.02);
        assert_eq!(score_short(&s).score, base + 2);

        s.short_pct_of_float = Some(0.30);
        assert_eq!(score_short(&s).score, base - 5);

        s.short_pct_of_float = Some(0.17);
        assert_eq!(score_short(&s).score, base - 2);
    }

    #[test]
    fn test_rating_and_bounce_extras() {
        let mut s = downtrend_bounce();
        let base = score_short(&s).score;
        s.analyst_rating = Some(AnalystRating::Underperform);
        s.change_5d_pct = Some(4.5);
        s.rsi_divergence = RsiDivergence::Bearish;
        let result = score_short(&s);
        assert_eq!(result.score, base + 2 + 5 + 5);
        assert!(result.has_signal("5d bounce in downtrend"));
        assert!(result.has_signal("Bearish divergence"));

        s.analyst_rating = Some(AnalystRating::StrongBuy);
        assert_eq!(score_short(&s).score, base + 5 + 5);
    }
}
