//! Seasonal residual forecasting
//!
//! Extends the fitted trend line past the end of the series and adds back
//! the residuals of the most recent `horizon`-length window, so a weekly
//! wobble in the history reappears in the projection.

use kpi_spi::{AnalysisError, ForecastResult, Forecaster, Result};
use tracing::{debug, trace};

/// Linear projection plus last-window residual reinjection
#[derive(Debug, Clone, Copy, Default)]
pub struct SeasonalResidualForecaster;

impl SeasonalResidualForecaster {
    pub fn new() -> Self {
        Self
    }
}

impl Forecaster for SeasonalResidualForecaster {
    fn forecast(&self, series: &[f64], line: &[f64], horizon: usize) -> Result<ForecastResult> {
        forecast_with_residuals(series, line, horizon)
    }
}

/// Forecast `horizon` steps from a series and its fitted trend line.
///
/// The slope is recovered from the last two points of `line`. Step `k`
/// (1-based) reuses the residual at index `n - horizon + k - 1`; when the
/// series is shorter than the horizon that index wraps cyclically, so the
/// final step always reuses the last observed residual.
pub fn forecast_with_residuals(
    series: &[f64],
    line: &[f64],
    horizon: usize,
) -> Result<ForecastResult> {
    let n = series.len();
    if n < 2 {
        return Err(AnalysisError::insufficient_data(2, n));
    }
    if horizon < 1 {
        return Err(AnalysisError::invalid("horizon must be at least 1"));
    }
    if line.len() != n {
        return Err(AnalysisError::invalid(format!(
            "trend line has {} points but series has {}",
            line.len(),
            n
        )));
    }

    let last_trend = line[n - 1];
    let slope = line[n - 1] - line[n - 2];

    let values: Vec<f64> = (1..=horizon)
        .map(|k| {
            let idx = residual_index(n, horizon, k);
            let residual = series[idx] - line[idx];
            let value = last_trend + slope * k as f64 + residual;
            trace!(step = k, idx, residual, value, "forecast step");
            value
        })
        .collect();

    let mean = values.iter().sum::<f64>() / horizon as f64;
    debug!(n, horizon, slope, mean, "projected trend with seasonal residuals");

    Ok(ForecastResult {
        summary: format!(
            "Forecast for the next {} periods averages {:.2}",
            horizon, mean
        ),
        values,
    })
}

fn residual_index(n: usize, horizon: usize, k: usize) -> usize {
    let raw = n as isize - horizon as isize + k as isize - 1;
    raw.rem_euclid(n as isize) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trend::detect_trend;

    #[test]
    fn test_linear_series_continues_line() {
        let series: Vec<f64> = (0..10).map(|i| 10.0 + 2.0 * i as f64).collect();
        let trend = detect_trend(&series).unwrap();
        let forecast = forecast_with_residuals(&series, &trend.line, 3).unwrap();

        assert!((forecast.values[0] - 30.0).abs() < 1e-9);
        assert!((forecast.values[1] - 32.0).abs() < 1e-9);
        assert!((forecast.values[2] - 34.0).abs() < 1e-9);
    }

    #[test]
    fn test_horizon_length() {
        let series = vec![100.0, 110.0, 105.0, 120.0, 115.0, 130.0, 125.0];
        let trend = detect_trend(&series).unwrap();
        for horizon in 1..=20 {
            let forecast = forecast_with_residuals(&series, &trend.line, horizon).unwrap();
            assert_eq!(forecast.values.len(), horizon);
        }
    }

    #[test]
    fn test_residuals_are_reinjected() {
        // Period-2 wobble around a flat level
        let series = vec![90.0, 110.0, 90.0, 110.0, 90.0, 110.0];
        let line = vec![100.0; 6];
        let forecast = forecast_with_residuals(&series, &line, 2).unwrap();
        assert_eq!(forecast.values, vec![90.0, 110.0]);
    }

    #[test]
    fn test_short_series_wraps_residual_window() {
        let series = vec![10.0, 0.0, 10.0, 0.0];
        let line = vec![8.0, 6.0, 4.0, 2.0];
        let residuals = [2.0, -6.0, 6.0, -2.0];
        let forecast = forecast_with_residuals(&series, &line, 6).unwrap();

        assert_eq!(forecast.values.len(), 6);
        let expected_idx = [2, 3, 0, 1, 2, 3];
        for (k, &idx) in (1..=6).zip(expected_idx.iter()) {
            let expected = 2.0 - 2.0 * k as f64 + residuals[idx];
            assert!((forecast.values[k - 1] - expected).abs() < 1e-10);
        }
    }

    #[test]
    fn test_summary_mentions_mean() {
        let series = vec![1.0, 2.0, 3.0];
        let line = vec![1.0, 2.0, 3.0];
        let forecast = forecast_with_residuals(&series, &line, 2).unwrap();
        assert!(forecast.summary.contains("4.50"));
        assert!(forecast.summary.contains('2'));
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let result = forecast_with_residuals(&[1.0, 2.0], &[1.0, 2.0], 0);
        assert!(matches!(result, Err(AnalysisError::InvalidInput { .. })));
    }

    #[test]
    fn test_short_series_rejected() {
        assert!(forecast_with_residuals(&[1.0], &[1.0], 3).is_err());
    }

    #[test]
    fn test_mismatched_line_rejected() {
        assert!(forecast_with_residuals(&[1.0, 2.0, 3.0], &[1.0, 2.0], 3).is_err());
    }

    #[test]
    fn test_forecaster_trait() {
        let forecaster: Box<dyn Forecaster> = Box::new(SeasonalResidualForecaster::new());
        let forecast = forecaster.forecast(&[5.0, 5.0], &[5.0, 5.0], 7).unwrap();
        assert_eq!(forecast.values, vec![5.0; 7]);
    }
}
