//! Binance spot market data over the public REST API.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::{BINANCE_BASE_URL, CANDLE_TIMEFRAME};
use crate::models::indicators::Candle;
use crate::services::market_data::{MarketDataError, MarketDataProvider};

/// Candles from `GET /api/v3/klines`. Public endpoint, no signing.
#[derive(Clone)]
pub struct BinanceMarketDataProvider {
    base_url: String,
    interval: String,
    client: reqwest::Client,
}

impl BinanceMarketDataProvider {
    pub fn new() -> Self {
        Self::with_client(BINANCE_BASE_URL, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            interval: CANDLE_TIMEFRAME.to_string(),
            client,
        }
    }

    pub fn with_interval(mut self, interval: impl Into<String>) -> Self {
        self.interval = interval.into();
        self
    }

    fn klines_url(&self, symbol: &str, limit: usize) -> Result<Url, MarketDataError> {
        let mut url = Url::parse(&format!("{}/api/v3/klines", self.base_url))?;
        url.query_pairs_mut()
            .append_pair("symbol", &symbol.replace('/', ""))
            .append_pair("interval", &self.interval)
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }

    /// Parse Binance's array-of-arrays kline payload.
    ///
    /// Array indices:
    ///   [0] openTime, [1] open, [2] high, [3] low, [4] close, [5] volume, ...
    pub fn parse_klines(body: &Value) -> Result<Vec<Candle>, MarketDataError> {
        let raw = body
            .as_array()
            .ok_or_else(|| MarketDataError::Malformed("klines response is not an array".into()))?;

        let mut candles = Vec::with_capacity(raw.len());
        for entry in raw {
            let arr = entry
                .as_array()
                .ok_or_else(|| MarketDataError::Malformed("kline entry is not an array".into()))?;

            if arr.len() < 6 {
                warn!("skipping malformed kline entry with {} elements", arr.len());
                continue;
            }

            let timestamp = arr[0]
                .as_i64()
                .ok_or_else(|| MarketDataError::Malformed(format!("bad open time: {}", arr[0])))?;

            candles.push(Candle::new(
                timestamp,
                parse_str_f64(&arr[1])?,
                parse_str_f64(&arr[2])?,
                parse_str_f64(&arr[3])?,
                parse_str_f64(&arr[4])?,
                parse_str_f64(&arr[5])?,
            ));
        }

        candles.sort_by_key(|c| c.timestamp);
        Ok(candles)
    }
}

impl Default for BinanceMarketDataProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for BinanceMarketDataProvider {
    #[instrument(skip(self), name = "binance::get_candles")]
    async fn get_candles(&self, symbol: &str, limit: usize) -> Result<Vec<Candle>, MarketDataError> {
        let url = self.klines_url(symbol, limit)?;

        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| MarketDataError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|source| MarketDataError::Http {
            url: url.to_string(),
            source,
        })?;

        if !status.is_success() {
            return Err(MarketDataError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let body: Value = serde_json::from_str(&text)
            .map_err(|e| MarketDataError::Malformed(format!("klines response is not JSON: {}", e)))?;
        let mut candles = Self::parse_klines(&body)?;

        if candles.len() > limit {
            candles.drain(..candles.len() - limit);
        }

        debug!(symbol, count = candles.len(), "klines fetched");
        Ok(candles)
    }
}

/// Parse a JSON value that may be either a string or a number into `f64`.
fn parse_str_f64(val: &Value) -> Result<f64, MarketDataError> {
    if let Some(s) = val.as_str() {
        s.parse::<f64>()
            .map_err(|_| MarketDataError::Malformed(format!("failed to parse '{}' as f64", s)))
    } else if let Some(n) = val.as_f64() {
        Ok(n)
    } else {
        Err(MarketDataError::Malformed(format!(
            "expected string or number, got: {}",
            val
        )))
    }
}

impl std::fmt::Debug for BinanceMarketDataProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceMarketDataProvider")
            .field("base_url", &self.base_url)
            .field("interval", &self.interval)
            .finish()
    }
}
