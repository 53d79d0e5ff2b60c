//! Trend detection
//!
//! Fits an ordinary least squares line over the time index and labels the
//! slope relative to the first observation.

use kpi_spi::{AnalysisError, Result, TrendDetector, TrendLabel, TrendResult, TrendThresholds};
use tracing::{debug, warn};

/// OLS trend detector with configurable label thresholds
///
/// # Example
///
/// ```rust
/// use kpi_core::{LinearTrendDetector, TrendDetector, TrendLabel};
///
/// let detector = LinearTrendDetector::new();
/// let trend = detector.detect(&[100.0, 102.0, 104.0, 106.0]).unwrap();
/// assert_eq!(trend.label, TrendLabel::StrongGrowth);
/// assert_eq!(trend.line.len(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinearTrendDetector {
    thresholds: TrendThresholds,
}

impl LinearTrendDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(thresholds: TrendThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &TrendThresholds {
        &self.thresholds
    }
}

impl TrendDetector for LinearTrendDetector {
    fn detect(&self, series: &[f64]) -> Result<TrendResult> {
        let (slope, intercept) = fit_line(series)?;
        let line: Vec<f64> = (0..series.len())
            .map(|i| slope * i as f64 + intercept)
            .collect();
        let label = classify_slope(slope, series[0], &self.thresholds);

        debug!(n = series.len(), slope, intercept, %label, "fitted linear trend");

        Ok(TrendResult {
            line,
            label,
            slope,
            intercept,
        })
    }
}

/// Detect the trend of a series with the default thresholds
pub fn detect_trend(series: &[f64]) -> Result<TrendResult> {
    LinearTrendDetector::new().detect(series)
}

/// Least squares fit of `y = slope * i + intercept`, returning `(slope, intercept)`.
pub fn fit_line(series: &[f64]) -> Result<(f64, f64)> {
    if series.len() < 2 {
        return Err(AnalysisError::insufficient_data(2, series.len()));
    }
    if let Some(pos) = series.iter().position(|y| !y.is_finite()) {
        return Err(AnalysisError::invalid(format!(
            "non-finite value at index {}",
            pos
        )));
    }

    let n = series.len() as f64;
    let sum_t: f64 = (0..series.len()).map(|i| i as f64).sum();
    let sum_y: f64 = series.iter().sum();
    let sum_t2: f64 = (0..series.len()).map(|i| (i * i) as f64).sum();
    let sum_ty: f64 = series.iter().enumerate().map(|(i, &y)| i as f64 * y).sum();

    // Positive for any n >= 2
    let denominator = n * sum_t2 - sum_t * sum_t;

    let slope = (n * sum_ty - sum_t * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_t) / n;
    Ok((slope, intercept))
}

/// Label a slope relative to the series' first value.
///
/// Bands are an ordered partition of `slope / |y0|`. With a zero baseline
/// the relative bands are undefined, so any rise is strong growth and any
/// fall strong decline.
pub fn classify_slope(slope: f64, y0: f64, thresholds: &TrendThresholds) -> TrendLabel {
    let base = y0.abs();
    if base == 0.0 {
        warn!(slope, "zero baseline, labelling trend by slope sign");
        return if slope > 0.0 {
            TrendLabel::StrongGrowth
        } else if slope < 0.0 {
            TrendLabel::StrongDecline
        } else {
            TrendLabel::Stable
        };
    }

    if slope > thresholds.strong * base {
        TrendLabel::StrongGrowth
    } else if slope > thresholds.moderate * base {
        TrendLabel::ModerateGrowth
    } else if slope < -thresholds.strong * base {
        TrendLabel::StrongDecline
    } else if slope < -thresholds.moderate * base {
        TrendLabel::ModerateDecline
    } else {
        TrendLabel::Stable
    }
}
