//! RSI (Relative Strength Index) indicator

use crate::indicators::error::{ensure_finite, IndicatorError};
use crate::models::indicators::{Candle, RsiIndicator};

const NAME: &str = "RSI";

/// Calculate Wilder's RSI over the whole window and return the latest value.
///
/// The first average gain/loss is the simple mean of the first `period`
/// close-to-close changes; every later change is folded in with Wilder
/// smoothing: `avg = (avg * (period - 1) + change) / period`.
///
/// RSI = 100 - (100 / (1 + RS)), RS = Average Gain / Average Loss
pub fn calculate_rsi(candles: &[Candle], period: u32) -> Result<RsiIndicator, IndicatorError> {
    let n = period as usize;
    if n == 0 {
        return Err(IndicatorError::InvalidParameters {
            indicator: NAME,
            reason: "period must be positive".to_string(),
        });
    }
    if candles.len() < n + 1 {
        return Err(IndicatorError::InsufficientData {
            indicator: NAME,
            required: n + 1,
            available: candles.len(),
        });
    }

    let changes: Vec<f64> = candles
        .windows(2)
        .map(|pair| pair[1].close - pair[0].close)
        .collect();

    let (seed_gain, seed_loss) = changes[..n]
        .iter()
        .fold((0.0, 0.0), |(gain, loss), &change| {
            (gain + change.max(0.0), loss + (-change).max(0.0))
        });
    let mut avg_gain = seed_gain / n as f64;
    let mut avg_loss = seed_loss / n as f64;

    for &change in &changes[n..] {
        avg_gain = (avg_gain * (n as f64 - 1.0) + change.max(0.0)) / n as f64;
        avg_loss = (avg_loss * (n as f64 - 1.0) + (-change).max(0.0)) / n as f64;
    }

    ensure_finite(NAME, avg_gain)?;
    ensure_finite(NAME, avg_loss)?;

    // A window with no movement at all has no defined RSI.
    if avg_gain == 0.0 && avg_loss == 0.0 {
        return Err(IndicatorError::InvalidComputation { indicator: NAME });
    }

    let value = if avg_loss == 0.0 {
        100.0
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - (100.0 / (1.0 + rs))
    };

    Ok(RsiIndicator {
        value: ensure_finite(NAME, value)?.clamp(0.0, 100.0),
        period,
    })
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(candles: &[Candle]) -> Result<RsiIndicator, IndicatorError> {
    calculate_rsi(candles, 14)
}
