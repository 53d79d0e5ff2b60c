//! Trait for trend detection

use crate::error::Result;
use crate::model::TrendResult;

/// Fits a trend to a series and classifies its strength.
pub trait TrendDetector: Send + Sync {
    /// Fit the trend. Fails with `InvalidInput` for fewer than two points.
    fn detect(&self, series: &[f64]) -> Result<TrendResult>;
}
