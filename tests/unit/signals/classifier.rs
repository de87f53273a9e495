//! Unit tests for signal classification thresholds

use ta_fortress::models::indicators::IndicatorSnapshot;
use ta_fortress::models::signal::SignalDirection::{Buy, Neutral, Sell};
use ta_fortress::signals::{classify, classify_bollinger, classify_macd, classify_rsi};

fn snapshot(rsi: f64, macd: f64, macd_signal: f64, upper: f64, lower: f64) -> IndicatorSnapshot {
    IndicatorSnapshot {
        rsi,
        macd,
        macd_signal,
        bb_upper: upper,
        bb_middle: (upper + lower) / 2.0,
        bb_lower: lower,
        close: (upper + lower) / 2.0,
    }
}

#[test]
fn test_rsi_thresholds() {
    assert_eq!(classify_rsi(70.0), Neutral);
    assert_eq!(classify_rsi(70.01), Sell);
    assert_eq!(classify_rsi(29.99), Buy);
    assert_eq!(classify_rsi(30.0), Neutral);
    assert_eq!(classify_rsi(50.0), Neutral);
    assert_eq!(classify_rsi(0.0), Buy);
    assert_eq!(classify_rsi(100.0), Sell);
}

#[test]
fn test_macd_is_strict() {
    assert_eq!(classify_macd(1.0, 0.5), Buy);
    assert_eq!(classify_macd(0.5, 1.0), Sell);
    assert_eq!(classify_macd(0.75, 0.75), Sell);
    assert_eq!(classify_macd(-0.1, -0.2), Buy);
}

#[test]
fn test_bollinger_band_edges() {
    let (upper, lower) = (110.0, 90.0);
    assert_eq!(classify_bollinger(upper, upper, lower), Neutral);
    assert_eq!(classify_bollinger(upper + 0.01, upper, lower), Sell);
    assert_eq!(classify_bollinger(lower, upper, lower), Neutral);
    assert_eq!(classify_bollinger(lower - 0.01, upper, lower), Buy);
    assert_eq!(classify_bollinger(100.0, upper, lower), Neutral);
}

#[test]
fn test_classify_combines_rules() {
    let s = snapshot(75.0, 0.2, 0.3, 110.0, 90.0);
    let signals = classify(&s, 85.0);
    assert_eq!(signals.rsi, Sell);
    assert_eq!(signals.macd, Sell);
    assert_eq!(signals.bollinger, Buy);

    let signals = classify(&s, 100.0);
    assert_eq!(signals.bollinger, Neutral);
}

#[test]
fn test_signal_labels() {
    assert_eq!(serde_json::to_string(&Buy).unwrap(), "\"BUY\"");
    assert_eq!(serde_json::to_string(&Sell).unwrap(), "\"SELL\"");
    assert_eq!(serde_json::to_string(&Neutral).unwrap(), "\"NEUTRAL\"");
    assert_eq!(Neutral.to_string(), "NEUTRAL");
}
