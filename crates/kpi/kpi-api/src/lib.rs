//! KPI Consumer API
//!
//! Consumer configuration and builder APIs for the KPI analysis engine.
//!
//! This crate provides:
//! - [`AnalysisConfig`] for horizon, trend thresholds and driver seeding
//! - [`AnalyzerBuilder`] for assembling an [`Analyzer`] with injected parts
//! - Re-exports from SPI and core for convenience

// Re-export from core
pub use kpi_core::{
    analyzer, correlation, drivers, forecast, narrative, stats, trend, Analyzer, CorrelationMatrix,
    DriverCatalog, KpiRequest, LinearTrendDetector, SeasonalResidualForecaster, TemplateNarrator,
};

// Re-export traits and model from SPI
pub use kpi_spi::{
    AnalysisError, AnalysisResult, Direction, DriverPools, DriverSelector, ForecastResult,
    Forecaster, NamedSeries, NarrativeContext, NarrativeGenerator, NarrativeStream, Result,
    SeriesStats, TrendDetector, TrendLabel, TrendResult, TrendThresholds, DEFAULT_HORIZON,
    DRIVER_COUNT,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for analysis runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Forecast horizon when a request does not give one
    pub horizon: usize,
    /// Relative slope above which a trend is strong
    pub strong_threshold: f64,
    /// Relative slope above which a trend is moderate
    pub moderate_threshold: f64,
    /// Seed for driver sampling; `None` for ambient randomness
    pub seed: Option<u64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let thresholds = TrendThresholds::default();
        Self {
            horizon: DEFAULT_HORIZON,
            strong_threshold: thresholds.strong,
            moderate_threshold: thresholds.moderate,
            seed: None,
        }
    }
}

impl AnalysisConfig {
    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| AnalysisError::invalid(format!("malformed configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.horizon < 1 {
            return Err(AnalysisError::invalid("horizon must be at least 1"));
        }
        self.thresholds().validate()
    }

    pub fn thresholds(&self) -> TrendThresholds {
        TrendThresholds {
            strong: self.strong_threshold,
            moderate: self.moderate_threshold,
        }
    }
}

/// Builder assembling an [`Analyzer`] from configuration and optional
/// replacement components
#[derive(Default)]
pub struct AnalyzerBuilder {
    config: AnalysisConfig,
    detector: Option<Box<dyn TrendDetector>>,
    forecaster: Option<Box<dyn Forecaster>>,
    drivers: Option<Box<dyn DriverSelector>>,
}

impl AnalyzerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn horizon(mut self, horizon: usize) -> Self {
        self.config.horizon = horizon;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn trend_detector(mut self, detector: Box<dyn TrendDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    pub fn forecaster(mut self, forecaster: Box<dyn Forecaster>) -> Self {
        self.forecaster = Some(forecaster);
        self
    }

    pub fn driver_selector(mut self, drivers: Box<dyn DriverSelector>) -> Self {
        self.drivers = Some(drivers);
        self
    }

    /// Validate the configuration and build the analyzer
    pub fn build(self) -> Result<Analyzer> {
        self.config.validate()?;
        debug!(config = ?self.config, "building analyzer");

        let thresholds = self.config.thresholds();
        let detector = self
            .detector
            .unwrap_or_else(|| Box::new(LinearTrendDetector::with_thresholds(thresholds)));
        let forecaster = self
            .forecaster
            .unwrap_or_else(|| Box::new(SeasonalResidualForecaster::new()));
        let drivers = self
            .drivers
            .unwrap_or_else(|| Box::new(DriverCatalog::default()));

        Ok(Analyzer::new(detector, forecaster, drivers)
            .with_horizon(self.config.horizon)
            .with_seed(self.config.seed))
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{AnalysisConfig, AnalyzerBuilder};
    pub use kpi_core::{
        correlation::{correlation_matrix, pearson_correlation},
        narrative::collect_narrative,
        stats::series_stats,
        Analyzer, DriverCatalog, KpiRequest, TemplateNarrator,
    };
    pub use kpi_spi::{
        AnalysisError, AnalysisResult, Direction, DriverSelector, ForecastResult, Forecaster,
        NamedSeries, NarrativeContext, NarrativeGenerator, Result, SeriesStats, TrendDetector,
        TrendLabel, TrendResult,
    };
}
