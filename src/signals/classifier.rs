//! Threshold rules mapping the latest indicator values to trading signals.
//!
//! Every rule is strict: a value sitting exactly on a threshold or band
//! classifies as NEUTRAL (RSI, Bollinger) or SELL (MACD).

use crate::models::indicators::IndicatorSnapshot;
use crate::models::signal::{SignalDirection, SignalSet};

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

pub fn classify_rsi(rsi: f64) -> SignalDirection {
    if rsi > RSI_OVERBOUGHT {
        SignalDirection::Sell
    } else if rsi < RSI_OVERSOLD {
        SignalDirection::Buy
    } else {
        SignalDirection::Neutral
    }
}

/// MACD has no neutral state; equality is bearish.
pub fn classify_macd(macd: f64, signal: f64) -> SignalDirection {
    if macd > signal {
        SignalDirection::Buy
    } else {
        SignalDirection::Sell
    }
}

pub fn classify_bollinger(close: f64, upper: f64, lower: f64) -> SignalDirection {
    if close > upper {
        SignalDirection::Sell
    } else if close < lower {
        SignalDirection::Buy
    } else {
        SignalDirection::Neutral
    }
}

pub fn classify(snapshot: &IndicatorSnapshot, close: f64) -> SignalSet {
    SignalSet {
        rsi: classify_rsi(snapshot.rsi),
        macd: classify_macd(snapshot.macd, snapshot.macd_signal),
        bollinger: classify_bollinger(close, snapshot.bb_upper, snapshot.bb_lower),
    }
}
