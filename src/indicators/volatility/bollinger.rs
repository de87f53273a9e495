//! Bollinger Bands indicator

use crate::common::math;
use crate::indicators::error::{ensure_finite, IndicatorError};
use crate::models::indicators::{BollingerBandsIndicator, Candle};

const NAME: &str = "Bollinger Bands";

/// Calculate Bollinger Bands at the latest candle
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (std_dev * population standard deviation)
/// Lower Band = Middle - (std_dev * population standard deviation)
pub fn calculate_bollinger_bands(
    candles: &[Candle],
    period: u32,
    std_dev: f64,
) -> Result<BollingerBandsIndicator, IndicatorError> {
    let n = period as usize;
    if n == 0 {
        return Err(IndicatorError::InvalidParameters {
            indicator: NAME,
            reason: "period must be positive".to_string(),
        });
    }
    if candles.len() < n {
        return Err(IndicatorError::InsufficientData {
            indicator: NAME,
            required: n,
            available: candles.len(),
        });
    }

    let closes: Vec<f64> = candles[candles.len() - n..].iter().map(|c| c.close).collect();
    let invalid = || IndicatorError::InvalidComputation { indicator: NAME };
    let middle = math::sma(&closes, n).ok_or_else(invalid)?;
    let std = math::standard_deviation(&closes, n).ok_or_else(invalid)?;

    let upper = middle + (std_dev * std);
    let lower = middle - (std_dev * std);

    Ok(BollingerBandsIndicator {
        upper: ensure_finite(NAME, upper)?,
        middle: ensure_finite(NAME, middle)?,
        lower: ensure_finite(NAME, lower)?,
        period,
        std_dev,
    })
}

/// Calculate Bollinger Bands with default parameters (20 SMA, 2σ)
pub fn calculate_bollinger_bands_default(
    candles: &[Candle],
) -> Result<BollingerBandsIndicator, IndicatorError> {
    calculate_bollinger_bands(candles, 20, 2.0)
}
