use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    #[error("insufficient data for {indicator}: need {required} candles, got {available}")]
    InsufficientData {
        indicator: &'static str,
        required: usize,
        available: usize,
    },

    #[error("invalid computation: {indicator} is not a finite number")]
    InvalidComputation { indicator: &'static str },

    #[error("invalid {indicator} parameters: {reason}")]
    InvalidParameters {
        indicator: &'static str,
        reason: String,
    },
}

/// Reject non-finite results so NaN never reaches a report.
pub(crate) fn ensure_finite(indicator: &'static str, value: f64) -> Result<f64, IndicatorError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(IndicatorError::InvalidComputation { indicator })
    }
}
