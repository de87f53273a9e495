//! USDT → PHP conversion rate from CoinGecko's simple price endpoint.
//!
//! A failed fetch never fails the report: the provider logs the error and
//! hands back [`FALLBACK_PHP_RATE`] flagged as a fallback.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use crate::config::{FALLBACK_PHP_RATE, FX_RATE_TIMEOUT, FX_RATE_URL};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FxRate {
    pub value: f64,
    /// True when `value` is the hardcoded default rather than a live quote
    pub is_fallback: bool,
}

impl FxRate {
    pub fn live(value: f64) -> Self {
        Self {
            value,
            is_fallback: false,
        }
    }

    pub fn fallback() -> Self {
        Self {
            value: FALLBACK_PHP_RATE,
            is_fallback: true,
        }
    }

    pub fn convert(&self, amount: f64) -> f64 {
        amount * self.value
    }
}

#[derive(Debug, Error)]
pub enum FxRateError {
    #[error("FX request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("FX endpoint returned {0}")]
    Status(u16),

    #[error("FX rate is not a positive finite number: {0}")]
    InvalidRate(f64),
}

#[async_trait]
pub trait FxRateProvider: Send + Sync {
    /// Current local-currency rate. Infallible by contract: failures resolve
    /// to [`FxRate::fallback`].
    async fn fetch_local_rate(&self) -> FxRate;
}

#[derive(Debug, Deserialize)]
struct SimplePriceResponse {
    tether: TetherQuote,
}

#[derive(Debug, Deserialize)]
struct TetherQuote {
    php: f64,
}

#[derive(Debug, Clone)]
pub struct CoinGeckoFxRateProvider {
    url: String,
    client: reqwest::Client,
}

impl CoinGeckoFxRateProvider {
    pub fn new() -> Result<Self, FxRateError> {
        Self::with_url(FX_RATE_URL, FX_RATE_TIMEOUT)
    }

    pub fn with_url(url: impl Into<String>, timeout: Duration) -> Result<Self, FxRateError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    async fn request_rate(&self) -> Result<f64, FxRateError> {
        let resp = self.client.get(&self.url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FxRateError::Status(status.as_u16()));
        }

        let body: SimplePriceResponse = resp.json().await?;
        let rate = body.tether.php;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(FxRateError::InvalidRate(rate));
        }

        Ok(rate)
    }
}

#[async_trait]
impl FxRateProvider for CoinGeckoFxRateProvider {
    async fn fetch_local_rate(&self) -> FxRate {
        match self.request_rate().await {
            Ok(rate) => {
                info!(rate, "Fetched USDT/PHP rate");
                FxRate::live(rate)
            }
            Err(e) => {
                error!(
                    error = %e,
                    fallback = FALLBACK_PHP_RATE,
                    "Failed to fetch USDT/PHP rate, using fallback"
                );
                FxRate::fallback()
            }
        }
    }
}
