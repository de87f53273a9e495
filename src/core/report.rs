//! Full-analysis report assembly.
//!
//! One report = one FX fetch followed by an independent analysis per trading
//! pair. A pair's failure is captured as its own entry and never affects the
//! other pairs or the FX rate applied to them.

use std::sync::Arc;
use std::time::Instant;

use futures_util::stream::{self, StreamExt};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{CANDLE_LIMIT, REPORT_CONCURRENCY, TRADING_PAIRS};
use crate::indicators::{compute_indicators, IndicatorError};
use crate::metrics::Metrics;
use crate::models::indicators::IndicatorSnapshot;
use crate::models::pair::TradingPair;
use crate::models::report::{Analysis, AssetReport, BollingerValue, FullReport, LivePrices};
use crate::models::signal::SignalSet;
use crate::services::fx_rate::{FxRate, FxRateProvider};
use crate::services::market_data::{MarketDataError, MarketDataProvider};
use crate::signals::classify;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("No data returned for {symbol}")]
    NoData { symbol: String },

    #[error("Failed to fetch candles for {symbol}: {source}")]
    MarketData {
        symbol: String,
        #[source]
        source: MarketDataError,
    },

    #[error(transparent)]
    Indicator(#[from] IndicatorError),
}

/// Successful per-pair result before currency conversion
#[derive(Debug, Clone, PartialEq)]
pub struct PairAnalysis {
    pub snapshot: IndicatorSnapshot,
    pub signals: SignalSet,
}

impl PairAnalysis {
    pub fn close(&self) -> f64 {
        self.snapshot.close
    }

    /// Render the success entry, pricing the close in USD and local currency.
    pub fn to_asset_report(&self, fx_rate: &FxRate) -> Result<AssetReport, AnalysisError> {
        let usd = self.close();
        let php = fx_rate.convert(usd);
        if !php.is_finite() {
            return Err(IndicatorError::InvalidComputation {
                indicator: "local price",
            }
            .into());
        }

        Ok(AssetReport {
            live_prices: Some(LivePrices { usd, php }),
            analysis: Analysis::Signals {
                rsi_value: self.snapshot.rsi,
                rsi_signal: self.signals.rsi,
                macd_signal: self.signals.macd,
                bb_value: BollingerValue {
                    upper: self.snapshot.bb_upper,
                    lower: self.snapshot.bb_lower,
                },
                bb_signal: self.signals.bollinger,
            },
        })
    }
}

/// A built report together with the FX rate that priced it
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub report: FullReport,
    pub fx_rate: FxRate,
}

pub struct ReportAssembler {
    market_data: Arc<dyn MarketDataProvider>,
    fx_rates: Arc<dyn FxRateProvider>,
    pairs: Vec<TradingPair>,
    candle_limit: usize,
    concurrency: usize,
    metrics: Option<Arc<Metrics>>,
}

impl ReportAssembler {
    pub fn new(
        market_data: Arc<dyn MarketDataProvider>,
        fx_rates: Arc<dyn FxRateProvider>,
    ) -> Self {
        Self {
            market_data,
            fx_rates,
            pairs: TRADING_PAIRS.to_vec(),
            candle_limit: CANDLE_LIMIT,
            concurrency: REPORT_CONCURRENCY,
            metrics: None,
        }
    }

    pub fn with_pairs(mut self, pairs: Vec<TradingPair>) -> Self {
        self.pairs = pairs;
        self
    }

    /// Pairs analysed at once. 1 makes the report strictly sequential.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_candle_limit(mut self, candle_limit: usize) -> Self {
        self.candle_limit = candle_limit;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn pairs(&self) -> &[TradingPair] {
        &self.pairs
    }

    /// Fetch, compute and classify a single pair.
    pub async fn analyze_pair(&self, pair: &TradingPair) -> Result<PairAnalysis, AnalysisError> {
        let candles = self
            .market_data
            .get_candles(pair.symbol, self.candle_limit)
            .await
            .map_err(|source| AnalysisError::MarketData {
                symbol: pair.symbol.to_string(),
                source,
            })?;

        if candles.is_empty() {
            return Err(AnalysisError::NoData {
                symbol: pair.symbol.to_string(),
            });
        }

        let snapshot = compute_indicators(&candles)?;
        let signals = classify(&snapshot, snapshot.close);

        Ok(PairAnalysis { snapshot, signals })
    }

    /// Build the report for the configured pair table
    pub async fn build_report(&self) -> ReportOutcome {
        self.build_report_for(&self.pairs).await
    }

    /// Build a report over `pairs`, keyed by asset id in the given order.
    pub async fn build_report_for(&self, pairs: &[TradingPair]) -> ReportOutcome {
        let started = Instant::now();
        let fx_rate = self.fx_rates.fetch_local_rate().await;

        // `buffered` yields results in input order regardless of completion order
        let outcomes: Vec<(TradingPair, Result<PairAnalysis, AnalysisError>)> =
            stream::iter(pairs.iter().copied())
                .map(|pair| async move { (pair, self.analyze_pair(&pair).await) })
                .buffered(self.concurrency)
                .collect()
                .await;

        let mut report = FullReport::with_capacity(outcomes.len());
        for (pair, outcome) in outcomes {
            let entry = match outcome.and_then(|analysis| analysis.to_asset_report(&fx_rate)) {
                Ok(entry) => {
                    debug!(symbol = %pair.symbol, asset = %pair.asset_id, "Pair analysed");
                    entry
                }
                Err(e) => {
                    warn!(
                        symbol = %pair.symbol,
                        asset = %pair.asset_id,
                        error = %e,
                        "Pair analysis failed"
                    );
                    AssetReport::failure(e.to_string())
                }
            };
            report.insert(pair.asset_id, entry);
        }

        let failures = report.failure_count();
        if let Some(metrics) = &self.metrics {
            metrics.reports_built_total.inc();
            metrics.pair_analysis_failures_total.inc_by(failures as u64);
            if fx_rate.is_fallback {
                metrics.fx_rate_fallback_total.inc();
            }
        }

        info!(
            pairs = report.len(),
            failures,
            fx_rate = fx_rate.value,
            fx_fallback = fx_rate.is_fallback,
            duration_ms = started.elapsed().as_millis() as u64,
            "Full analysis report built"
        );

        ReportOutcome { report, fx_rate }
    }
}
