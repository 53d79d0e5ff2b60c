//! Analysis orchestration
//!
//! Composes trend detection, forecasting and driver selection into one
//! [`AnalysisResult`]. Any stage failure aborts the whole analysis and is
//! returned unchanged.

use crate::correlation::pearson_correlation;
use crate::drivers::DriverCatalog;
use crate::forecast::SeasonalResidualForecaster;
use crate::stats::series_stats;
use crate::trend::LinearTrendDetector;
use kpi_spi::{
    AnalysisResult, DriverSelector, Forecaster, Result, TrendDetector, DEFAULT_HORIZON,
};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

/// One KPI to analyse in a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiRequest {
    pub name: String,
    pub category: String,
    pub series: Vec<f64>,
    #[serde(default)]
    pub horizon: Option<usize>,
}

/// Runs the full trend → forecast → drivers pipeline
///
/// # Example
///
/// ```rust
/// use kpi_core::{Analyzer, TrendLabel};
///
/// let analyzer = Analyzer::default().with_seed(Some(42));
/// let series = vec![100.0, 110.0, 105.0, 120.0, 115.0, 130.0, 125.0];
/// let result = analyzer.analyze(&series, "Финансы", None).unwrap();
///
/// assert_eq!(result.forecast.values.len(), 7);
/// assert_eq!(result.drivers.len(), 2);
/// assert_eq!(result.trend.label, TrendLabel::StrongGrowth);
/// ```
pub struct Analyzer {
    detector: Box<dyn TrendDetector>,
    forecaster: Box<dyn Forecaster>,
    drivers: Box<dyn DriverSelector>,
    horizon: usize,
    seed: Option<u64>,
}

impl Analyzer {
    pub fn new(
        detector: Box<dyn TrendDetector>,
        forecaster: Box<dyn Forecaster>,
        drivers: Box<dyn DriverSelector>,
    ) -> Self {
        Self {
            detector,
            forecaster,
            drivers,
            horizon: DEFAULT_HORIZON,
            seed: None,
        }
    }

    /// Horizon used when a request does not specify one
    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    /// Fixed seed for driver sampling; `None` uses ambient randomness
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn driver_selector(&self) -> &dyn DriverSelector {
        self.drivers.as_ref()
    }

    /// Analyse a series for a category
    pub fn analyze(
        &self,
        series: &[f64],
        category: &str,
        horizon: Option<usize>,
    ) -> Result<AnalysisResult> {
        match self.seed {
            Some(seed) => {
                self.analyze_with_rng(series, category, horizon, &mut StdRng::seed_from_u64(seed))
            }
            None => self.analyze_with_rng(series, category, horizon, &mut rand::thread_rng()),
        }
    }

    /// Analyse with an explicit random source for driver sampling
    pub fn analyze_with_rng(
        &self,
        series: &[f64],
        category: &str,
        horizon: Option<usize>,
        rng: &mut dyn RngCore,
    ) -> Result<AnalysisResult> {
        let horizon = horizon.unwrap_or(self.horizon);
        let _span = debug_span!("analyze", category, n = series.len(), horizon).entered();

        let trend = self.detector.detect(series)?;
        let forecast = self.forecaster.forecast(series, &trend.line, horizon)?;
        let drivers = self.drivers.select(category, trend.label.direction(), rng)?;

        debug!(label = %trend.label, forecast_mean = forecast.mean(), "analysis complete");

        Ok(AnalysisResult {
            data: series.to_vec(),
            stats: series_stats(series),
            trend,
            forecast,
            drivers,
        })
    }

    /// Analyse independent KPIs in parallel, one result per request in order.
    ///
    /// With a fixed seed, request `i` samples drivers from `seed + i`.
    pub fn analyze_batch(&self, requests: &[KpiRequest]) -> Vec<Result<AnalysisResult>> {
        requests
            .par_iter()
            .enumerate()
            .map(|(i, request)| match self.seed {
                Some(seed) => self.analyze_with_rng(
                    &request.series,
                    &request.category,
                    request.horizon,
                    &mut StdRng::seed_from_u64(seed.wrapping_add(i as u64)),
                ),
                None => self.analyze_with_rng(
                    &request.series,
                    &request.category,
                    request.horizon,
                    &mut rand::thread_rng(),
                ),
            })
            .collect()
    }

    /// Pearson correlation of two series, reported independently of analyses
    pub fn correlate(&self, x: &[f64], y: &[f64]) -> f64 {
        pearson_correlation(x, y)
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(
            Box::new(LinearTrendDetector::new()),
            Box::new(SeasonalResidualForecaster::new()),
            Box::new(DriverCatalog::default()),
        )
    }
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("horizon", &self.horizon)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}
