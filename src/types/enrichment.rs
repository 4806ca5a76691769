use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Consensus analyst recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalystRating {
    StrongBuy,
    Buy,
    Hold,
    Underperform,
    Sell,
    StrongSell,
}

impl AnalystRating {
    /// Parse a provider recommendation key. Unknown keys yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "strong_buy" | "strongBuy" | "strong buy" => Some(Self::StrongBuy),
            "buy" => Some(Self::Buy),
            "hold" => Some(Self::Hold),
            "underperform" => Some(Self::Underperform),
            "sell" => Some(Self::Sell),
            "strong_sell" | "strongSell" | "strong sell" => Some(Self::StrongSell),
            _ => None,
        }
    }

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::StrongBuy => "Strong Buy",
            Self::Buy => "Buy",
            Self::Hold => "Hold",
            Self::Underperform => "Underperform",
            Self::Sell => "Sell",
            Self::StrongSell => "Strong Sell",
        }
    }
}

/// Slow-changing per-symbol fields fetched for top candidates only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentRecord {
    #[serde(default)]
    pub analyst_rating: Option<AnalystRating>,
    /// Short interest as a fraction of float (0.12 = 12%).
    #[serde(default)]
    pub short_pct_of_float: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub next_earnings_date: Option<NaiveDate>,
}
