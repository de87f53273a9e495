//! Shared data models spanning the service layers.

pub mod indicators;
pub mod pair;
pub mod report;
pub mod signal;

pub use indicators::{
    BollingerBandsIndicator, Candle, IndicatorSnapshot, MacdIndicator, RsiIndicator,
};
pub use pair::TradingPair;
pub use report::{Analysis, AssetReport, BollingerValue, FullReport, LivePrices};
pub use signal::{SignalDirection, SignalSet};
