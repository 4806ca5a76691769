use thiserror::Error;

/// Screener error types.
#[derive(Error, Debug)]
pub enum ScreenerError {
    #[error("Insufficient data for {symbol}: need {required} bars, got {provided}")]
    InsufficientData {
        symbol: String,
        required: usize,
        provided: usize,
    },

    #[error("RSI undefined for {symbol}")]
    UndefinedRsi { symbol: String },

    #[error("Invalid price for {symbol}: {price}")]
    InvalidPrice { symbol: String, price: f64 },

    #[error("Enrichment unavailable for {symbol}: {reason}")]
    EnrichmentUnavailable { symbol: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

impl ScreenerError {
    /// Whether this error only means "skip this symbol" rather than a real failure.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(
            self,
            ScreenerError::InsufficientData { .. } | ScreenerError::UndefinedRsi { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ScreenerError>;
