//! Unit tests for report assembly with in-memory providers

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use ta_fortress::config::{FALLBACK_PHP_RATE, TRADING_PAIRS};
use ta_fortress::core::report::{AnalysisError, ReportAssembler};
use ta_fortress::metrics::Metrics;
use ta_fortress::models::indicators::Candle;
use ta_fortress::models::pair::TradingPair;
use ta_fortress::models::report::{Analysis, AssetReport};
use ta_fortress::models::signal::SignalDirection;
use ta_fortress::services::fx_rate::{FxRate, FxRateProvider};
use ta_fortress::services::market_data::{MarketDataError, MarketDataProvider};

use crate::fixtures::{fixture_candles, linear_candles};

/// Serves fixture candles for every symbol unless overridden
#[derive(Default)]
struct StubMarketData {
    overrides: HashMap<&'static str, Result<Vec<Candle>, String>>,
}

impl StubMarketData {
    fn with(mut self, symbol: &'static str, outcome: Result<Vec<Candle>, String>) -> Self {
        self.overrides.insert(symbol, outcome);
        self
    }
}

#[async_trait]
impl MarketDataProvider for StubMarketData {
    async fn get_candles(&self, symbol: &str, limit: usize) -> Result<Vec<Candle>, MarketDataError> {
        match self.overrides.get(symbol) {
            Some(Ok(candles)) => Ok(candles.clone()),
            Some(Err(message)) => Err(MarketDataError::Other(message.clone())),
            None => {
                let mut candles = fixture_candles();
                candles.truncate(limit);
                Ok(candles)
            }
        }
    }
}

struct StubFx(FxRate);

#[async_trait]
impl FxRateProvider for StubFx {
    async fn fetch_local_rate(&self) -> FxRate {
        self.0
    }
}

fn assembler(market: StubMarketData, rate: FxRate) -> ReportAssembler {
    ReportAssembler::new(Arc::new(market), Arc::new(StubFx(rate)))
}

fn error_message(entry: &AssetReport) -> &str {
    match &entry.analysis {
        Analysis::Error { error } => error,
        other => panic!("expected failure entry, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_window_fails_only_that_pair() {
    let pairs = vec![
        TradingPair::new("BTC/USDT", "bitcoin"),
        TradingPair::new("XYZ/USDT", "xyz"),
        TradingPair::new("ETH/USDT", "ethereum"),
    ];
    let market = StubMarketData::default().with("XYZ/USDT", Ok(Vec::new()));
    let outcome = assembler(market, FxRate::live(56.0))
        .build_report_for(&pairs)
        .await;
    let report = outcome.report;

    let xyz = report.get("xyz").unwrap();
    assert!(xyz.live_prices.is_none());
    assert_eq!(error_message(xyz), "No data returned for XYZ/USDT");

    for sibling in ["bitcoin", "ethereum"] {
        let entry = report.get(sibling).unwrap();
        assert!(!entry.is_failure(), "{} should succeed", sibling);
        assert!(entry.live_prices.is_some());
    }
}

#[tokio::test]
async fn test_report_keys_follow_table_order() {
    let outcome = assembler(StubMarketData::default(), FxRate::live(56.0))
        .build_report()
        .await;

    let keys: Vec<&str> = outcome.report.keys().collect();
    let expected: Vec<&str> = TRADING_PAIRS.iter().map(|p| p.asset_id).collect();
    assert_eq!(keys, expected);
    assert_eq!(outcome.report.failure_count(), 0);
}

#[tokio::test]
async fn test_key_set_survives_total_failure() {
    let market = TRADING_PAIRS.iter().fold(StubMarketData::default(), |m, pair| {
        m.with(pair.symbol, Err("exchange unavailable".to_string()))
    });
    let outcome = assembler(market, FxRate::live(56.0)).build_report().await;

    assert_eq!(outcome.report.len(), TRADING_PAIRS.len());
    assert_eq!(outcome.report.failure_count(), TRADING_PAIRS.len());
    let keys: Vec<&str> = outcome.report.keys().collect();
    let expected: Vec<&str> = TRADING_PAIRS.iter().map(|p| p.asset_id).collect();
    assert_eq!(keys, expected);
}

#[tokio::test]
async fn test_market_error_is_reported_per_pair() {
    let pair = TradingPair::new("BTC/USDT", "bitcoin");
    let market = StubMarketData::default().with("BTC/USDT", Err("delisted".to_string()));
    let assembler = assembler(market, FxRate::live(56.0));

    let err = assembler.analyze_pair(&pair).await.unwrap_err();
    assert!(matches!(err, AnalysisError::MarketData { .. }));

    let outcome = assembler.build_report_for(&[pair]).await;
    let message = error_message(outcome.report.get("bitcoin").unwrap()).to_string();
    assert!(message.contains("BTC/USDT"), "{}", message);
    assert!(message.contains("delisted"), "{}", message);
}

#[tokio::test]
async fn test_short_window_is_insufficient_data() {
    let pair = TradingPair::new("NEW/USDT", "newcoin");
    let market = StubMarketData::default().with("NEW/USDT", Ok(linear_candles(10, 1.0, 0.1)));
    let outcome = assembler(market, FxRate::live(56.0))
        .build_report_for(&[pair])
        .await;

    let message = error_message(outcome.report.get("newcoin").unwrap());
    assert!(message.contains("insufficient data"), "{}", message);
}

#[tokio::test]
async fn test_fallback_rate_prices_every_pair() {
    let outcome = assembler(StubMarketData::default(), FxRate::fallback())
        .build_report()
        .await;

    assert!(outcome.fx_rate.is_fallback);
    for (asset, entry) in outcome.report.iter() {
        let prices = entry.live_prices.as_ref().unwrap_or_else(|| panic!("{} has no prices", asset));
        assert!((prices.php - prices.usd * FALLBACK_PHP_RATE).abs() < 1e-9);
    }
}

#[tokio::test]
async fn test_fixture_pair_signals() {
    let pair = TradingPair::new("BTC/USDT", "bitcoin");
    let outcome = assembler(StubMarketData::default(), FxRate::live(50.0))
        .build_report_for(&[pair])
        .await;

    match &outcome.report.get("bitcoin").unwrap().analysis {
        Analysis::Signals {
            rsi_value,
            rsi_signal,
            macd_signal,
            bb_value,
            bb_signal,
        } => {
            assert!((rsi_value - 52.35294245997738).abs() < 1e-6);
            assert_eq!(*rsi_signal, SignalDirection::Neutral);
            assert_eq!(*macd_signal, SignalDirection::Buy);
            assert!(bb_value.upper > bb_value.lower);
            assert_eq!(*bb_signal, SignalDirection::Neutral);
        }
        other => panic!("unexpected analysis {:?}", other),
    }
}

#[tokio::test]
async fn test_concurrency_does_not_change_report() {
    let market = || StubMarketData::default().with("SOL/USDT", Ok(Vec::new()));

    let sequential = assembler(market(), FxRate::live(57.5))
        .with_concurrency(1)
        .build_report()
        .await;
    let concurrent = assembler(market(), FxRate::live(57.5))
        .with_concurrency(8)
        .build_report()
        .await;

    assert_eq!(sequential.report, concurrent.report);
}

#[test]
fn test_report_metrics_are_recorded() {
    let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
    let market = StubMarketData::default().with("BTC/USDT", Ok(Vec::new()));
    let assembler = assembler(market, FxRate::fallback()).with_metrics(metrics.clone());

    tokio_test::block_on(assembler.build_report());

    assert_eq!(metrics.reports_built_total.get(), 1);
    assert_eq!(metrics.pair_analysis_failures_total.get(), 1);
    assert_eq!(metrics.fx_rate_fallback_total.get(), 1);
}
