//! Market data provider interface.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::indicators::Candle;

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("exchange returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed market data: {0}")]
    Malformed(String),

    #[error("invalid endpoint: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("{0}")]
    Other(String),
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Get the trailing `limit` daily candles for an exchange symbol such as
    /// `BTC/USDT`, oldest first.
    async fn get_candles(&self, symbol: &str, limit: usize) -> Result<Vec<Candle>, MarketDataError>;
}
