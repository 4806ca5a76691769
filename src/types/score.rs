use serde::{Deserialize, Serialize};

/// Side of a trading setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Long,
    Short,
}

impl Side {
    /// Get display label for this side.
    pub fn label(&self) -> &'static str {
        match self {
            Side::Long => "LONG",
            Side::Short => "SHORT",
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Side::Long => Side::Short,
            Side::Short => Side::Long,
        }
    }
}

/// Output of one side's scoring heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Setup strength, 0 to 100 inclusive.
    pub score: u8,
    /// Contributing signal labels in the order their rules fired.
    pub signals: Vec<String>,
}

impl ScoreResult {
    /// First `n` signals, for compact display.
    pub fn top_signals(&self, n: usize) -> &[String] {
        &self.signals[..self.signals.len().min(n)]
    }

    pub fn has_signal(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.signals
            .iter()
            .any(|s| s.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_signals_truncates_in_order() {
        let result = ScoreResult {
            score: 50,
            signals: vec!["a".into(), "b".into(), "c".into(), "d".into(), "e".into()],
        };
        assert_eq!(result.top_signals(4), &["a", "b", "c", "d"]);
        assert_eq!(result.top_signals(10).len(), 5);
    }

    #[test]
    fn test_has_signal_is_case_insensitive() {
        let result = ScoreResult {
            score: 10,
            signals: vec!["SMA50 pullback".into()],
        };
        assert!(result.has_signal("Pullback"));
        assert!(!result.has_signal("bounce"));
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Long.opposite(), Side::Short);
        assert_eq!(Side::Short.label(), "SHORT");
    }
}
