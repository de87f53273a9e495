//! Runtime configuration and the static tables the report is built from.

use std::env;
use std::time::Duration;

use crate::models::pair::TradingPair;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ENVIRONMENT: &str = "sandbox";

/// Daily candles requested per pair
pub const CANDLE_LIMIT: usize = 100;
pub const CANDLE_TIMEFRAME: &str = "1d";

pub const BINANCE_BASE_URL: &str = "https://api.binance.com";

pub const FX_RATE_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=tether&vs_currencies=php";
/// USDT → PHP rate used whenever the live rate cannot be fetched
pub const FALLBACK_PHP_RATE: f64 = 58.0;
pub const FX_RATE_TIMEOUT: Duration = Duration::from_secs(10);

/// Pairs analysed concurrently within one report
pub const REPORT_CONCURRENCY: usize = 4;

/// Exchange symbol → canonical asset key. Order here is report order.
pub const TRADING_PAIRS: &[TradingPair] = &[
    TradingPair::new("BTC/USDT", "bitcoin"),
    TradingPair::new("ETH/USDT", "ethereum"),
    TradingPair::new("BNB/USDT", "binancecoin"),
    TradingPair::new("SOL/USDT", "solana"),
    TradingPair::new("XRP/USDT", "ripple"),
    TradingPair::new("ADA/USDT", "cardano"),
    TradingPair::new("DOGE/USDT", "dogecoin"),
    TradingPair::new("AVAX/USDT", "avalanche-2"),
    TradingPair::new("DOT/USDT", "polkadot"),
    TradingPair::new("LINK/USDT", "chainlink"),
    TradingPair::new("MATIC/USDT", "matic-network"),
    TradingPair::new("LTC/USDT", "litecoin"),
    TradingPair::new("TRX/USDT", "tron"),
    TradingPair::new("SHIB/USDT", "shiba-inu"),
    TradingPair::new("UNI/USDT", "uniswap"),
    TradingPair::new("ATOM/USDT", "cosmos"),
    TradingPair::new("NEAR/USDT", "near"),
    TradingPair::new("APT/USDT", "aptos"),
    TradingPair::new("ARB/USDT", "arbitrum"),
    TradingPair::new("SAND/USDT", "the-sandbox"),
    TradingPair::new("RON/USDT", "ronin"),
];

/// Deployment environment name (`ENVIRONMENT`), used to pick the log format
pub fn get_environment() -> String {
    env::var("ENVIRONMENT")
        .ok()
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub environment: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: parse_port(env::var("PORT").ok().as_deref()),
            environment: get_environment(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            environment: DEFAULT_ENVIRONMENT.to_string(),
        }
    }
}

/// Parse a port value, falling back to [`DEFAULT_PORT`] when absent or invalid
pub fn parse_port(value: Option<&str>) -> u16 {
    value
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(DEFAULT_PORT)
}
