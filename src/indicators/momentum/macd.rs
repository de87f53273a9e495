//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::indicators::error::{ensure_finite, IndicatorError};
use crate::models::indicators::{Candle, MacdIndicator};

const NAME: &str = "MACD";

/// Calculate MACD indicator
///
/// MACD = EMA(fast) - EMA(slow), defined from the first slow EMA onward
/// Signal = EMA(signal) of the MACD line
/// Histogram = MACD - Signal
pub fn calculate_macd(
    candles: &[Candle],
    fast_period: u32,
    slow_period: u32,
    signal_period: u32,
) -> Result<MacdIndicator, IndicatorError> {
    let (fast, slow, signal) = (
        fast_period as usize,
        slow_period as usize,
        signal_period as usize,
    );
    if fast == 0 || signal == 0 || fast >= slow {
        return Err(IndicatorError::InvalidParameters {
            indicator: NAME,
            reason: format!(
                "expected 0 < fast < slow and signal > 0, got ({}, {}, {})",
                fast_period, slow_period, signal_period
            ),
        });
    }

    let required = slow + signal;
    if candles.len() < required {
        return Err(IndicatorError::InsufficientData {
            indicator: NAME,
            required,
            available: candles.len(),
        });
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

    let insufficient = || IndicatorError::InsufficientData {
        indicator: NAME,
        required,
        available: candles.len(),
    };
    let fast_ema = math::ema_series(&closes, fast).ok_or_else(insufficient)?;
    let slow_ema = math::ema_series(&closes, slow).ok_or_else(insufficient)?;

    // fast_ema starts at close index fast-1, slow_ema at slow-1
    let offset = slow - fast;
    let macd_line: Vec<f64> = slow_ema
        .iter()
        .enumerate()
        .map(|(j, slow_value)| fast_ema[j + offset] - slow_value)
        .collect();

    let signal_line = math::ema_series(&macd_line, signal).ok_or_else(insufficient)?;

    let macd = *macd_line.last().ok_or_else(insufficient)?;
    let signal_value = *signal_line.last().ok_or_else(insufficient)?;

    Ok(MacdIndicator {
        macd: ensure_finite(NAME, macd)?,
        signal: ensure_finite(NAME, signal_value)?,
        histogram: macd - signal_value,
        period: (fast_period, slow_period, signal_period),
    })
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn calculate_macd_default(candles: &[Candle]) -> Result<MacdIndicator, IndicatorError> {
    calculate_macd(candles, 12, 26, 9)
}
