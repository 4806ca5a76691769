use serde::{Deserialize, Serialize};

use super::Side;

/// An open leveraged position held in the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenPosition {
    pub symbol: String,
    /// Knock-out barrier of the certificate, quoted in the underlying's price.
    #[serde(default)]
    pub ko_level: Option<f64>,
}

/// Inferred direction of an open position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionDirection {
    Long,
    Short,
    Unknown,
}

impl OpenPosition {
    /// Infer direction by comparing the knock-out level against the live price.
    ///
    /// The entry price is the certificate's price, not the stock's, so it says
    /// nothing about direction. A barrier below the stock is a long, above is a short.
    pub fn direction(&self, price: Option<f64>) -> PositionDirection {
        match (self.ko_level, price) {
            (Some(ko), Some(price)) if ko.is_finite() && price.is_finite() => {
                if ko < price {
                    PositionDirection::Long
                } else {
                    PositionDirection::Short
                }
            }
            _ => PositionDirection::Unknown,
        }
    }
}

/// How a ranked candidate relates to a position already held in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionAlignment {
    /// Held in the same direction as the setup.
    Aligned,
    /// Held in the opposite direction.
    Against,
    /// Held, direction unknown.
    Held,
}

impl PositionAlignment {
    pub fn between(side: Side, direction: PositionDirection) -> Self {
        match (side, direction) {
            (_, PositionDirection::Unknown) => PositionAlignment::Held,
            (Side::Long, PositionDirection::Long) | (Side::Short, PositionDirection::Short) => {
                PositionAlignment::Aligned
            }
            _ => PositionAlignment::Against,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(ko: Option<f64>) -> OpenPosition {
        OpenPosition {
            symbol: "NVDA".to_string(),
            ko_level: ko,
        }
    }

    #[test]
    fn test_direction_from_ko_level() {
        assert_eq!(position(Some(90.0)).direction(Some(100.0)), PositionDirection::Long);
        assert_eq!(position(Some(110.0)).direction(Some(100.0)), PositionDirection::Short);
        assert_eq!(position(None).direction(Some(100.0)), PositionDirection::Unknown);
        assert_eq!(position(Some(90.0)).direction(None), PositionDirection::Unknown);
    }

    #[test]
    fn test_alignment() {
        assert_eq!(
            PositionAlignment::between(Side::Long, PositionDirection::Long),
            PositionAlignment::Aligned
        );
        assert_eq!(
            PositionAlignment::between(Side::Short, PositionDirection::Long),
            PositionAlignment::Against
        );
        assert_eq!(
            PositionAlignment::between(Side::Short, PositionDirection::Unknown),
            PositionAlignment::Held
        );
    }
}
