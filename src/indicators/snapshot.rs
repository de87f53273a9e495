//! Latest-value snapshot across the report's indicator set.

use crate::indicators::error::{ensure_finite, IndicatorError};
use crate::indicators::momentum::{calculate_macd_default, calculate_rsi_default};
use crate::indicators::volatility::calculate_bollinger_bands_default;
use crate::models::indicators::{Candle, IndicatorSnapshot};

/// Candles needed before every indicator in the snapshot is defined:
/// MACD(12, 26, 9) is the longest warm-up.
pub const MIN_CANDLES: usize = 26 + 9;

/// Compute RSI(14), MACD(12, 26, 9) and Bollinger(20, 2σ) over the window
/// and keep only the latest point of each.
pub fn compute_indicators(candles: &[Candle]) -> Result<IndicatorSnapshot, IndicatorError> {
    if candles.len() < MIN_CANDLES {
        return Err(IndicatorError::InsufficientData {
            indicator: "indicator window",
            required: MIN_CANDLES,
            available: candles.len(),
        });
    }

    let close = candles
        .last()
        .map(|c| c.close)
        .ok_or(IndicatorError::InsufficientData {
            indicator: "indicator window",
            required: MIN_CANDLES,
            available: 0,
        })?;
    let close = ensure_finite("close", close)?;

    let rsi = calculate_rsi_default(candles)?;
    let macd = calculate_macd_default(candles)?;
    let bands = calculate_bollinger_bands_default(candles)?;

    let snapshot = IndicatorSnapshot {
        rsi: rsi.value,
        macd: macd.macd,
        macd_signal: macd.signal,
        bb_upper: bands.upper,
        bb_middle: bands.middle,
        bb_lower: bands.lower,
        close,
    };

    if !snapshot.is_finite() {
        return Err(IndicatorError::InvalidComputation {
            indicator: "indicator snapshot",
        });
    }

    Ok(snapshot)
}
