//! Prometheus metrics for the API server

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,
    pub reports_built_total: IntCounter,
    pub pair_analysis_failures_total: IntCounter,
    pub fx_rate_fallback_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total number of HTTP requests")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let http_requests_in_flight = IntGauge::new(
            "http_requests_in_flight",
            "Number of HTTP requests currently being served",
        )?;
        let reports_built_total =
            IntCounter::new("reports_built_total", "Full analysis reports built")?;
        let pair_analysis_failures_total = IntCounter::new(
            "pair_analysis_failures_total",
            "Pairs reported as failures across all reports",
        )?;
        let fx_rate_fallback_total = IntCounter::new(
            "fx_rate_fallback_total",
            "Reports that used the fallback FX rate",
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(reports_built_total.clone()))?;
        registry.register(Box::new(pair_analysis_failures_total.clone()))?;
        registry.register(Box::new(fx_rate_fallback_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            reports_built_total,
            pair_analysis_failures_total,
            fx_rate_fallback_total,
        })
    }

    /// Render all registered metrics in the Prometheus text format
    pub fn export(&self) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
