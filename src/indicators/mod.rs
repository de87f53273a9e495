pub mod error;
pub mod momentum;
pub mod snapshot;
pub mod volatility;

pub use error::IndicatorError;
pub use snapshot::*;
