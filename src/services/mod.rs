//! External collaborators: exchange candles and the FX rate.

pub mod binance;
pub mod fx_rate;
pub mod market_data;

pub use binance::BinanceMarketDataProvider;
pub use fx_rate::{CoinGeckoFxRateProvider, FxRate, FxRateProvider};
pub use market_data::{MarketDataError, MarketDataProvider};
