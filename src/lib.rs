//! TA Fortress: per-asset technical analysis over live exchange candles.
//!
//! The crate is split the same way the request flows:
//! services (market data, FX rate) → indicators → signals → core (report, HTTP).

pub mod common;
pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
