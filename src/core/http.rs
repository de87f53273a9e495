//! HTTP endpoint server using Axum

use axum::{
    extract::{Request, State},
    http::{HeaderName, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::core::report::ReportAssembler;
use crate::metrics::Metrics;
use crate::services::binance::BinanceMarketDataProvider;
use crate::services::fx_rate::CoinGeckoFxRateProvider;

pub const FX_FALLBACK_HEADER: HeaderName = HeaderName::from_static("x-fx-rate-fallback");

const HOME_PAGE: &str = concat!(
    "<h1>Crypto Data Fortress v3.0 (Precision Strike)</h1>",
    "<p>Daily candles from Binance, PHP rates from CoinGecko.</p>",
    "<p>Endpoints: <a href=\"/full-analysis\">/full-analysis</a></p>",
);

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<Metrics>,
    pub assembler: Arc<ReportAssembler>,
}

pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

pub async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}

/// Build a fresh report. Always 200; per-pair failures live in the body.
pub async fn full_analysis(State(state): State<AppState>) -> Response {
    let outcome = state.assembler.build_report().await;
    let fallback = if outcome.fx_rate.is_fallback {
        "true"
    } else {
        "false"
    };

    (
        StatusCode::OK,
        [(FX_FALLBACK_HEADER, fallback)],
        Json(outcome.report),
    )
        .into_response()
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();

    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .route("/full-analysis", get(full_analysis))
        .route("/metrics", get(metrics_handler))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Wire the production providers: Binance candles and CoinGecko FX rates.
pub fn build_state() -> Result<AppState, Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let assembler = ReportAssembler::new(
        Arc::new(BinanceMarketDataProvider::new()),
        Arc::new(CoinGeckoFxRateProvider::new()?),
    )
    .with_metrics(metrics.clone());

    Ok(AppState {
        metrics,
        assembler: Arc::new(assembler),
    })
}

pub async fn start_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state()?;
    let pairs = state.assembler.pairs().len();
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, pairs, "HTTP server listening on port {}", port);
    info!(
        "Full analysis available at http://0.0.0.0:{}/full-analysis",
        port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
