//! Trait for trend-based forecasting

use crate::error::Result;
use crate::model::ForecastResult;

/// Projects a fitted trend line `horizon` steps past the end of a series.
pub trait Forecaster: Send + Sync {
    /// `line` is the fitted trend of `series` and must have the same length.
    fn forecast(&self, series: &[f64], line: &[f64], horizon: usize) -> Result<ForecastResult>;
}
