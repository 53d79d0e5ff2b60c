//! KPI Core
//!
//! Core implementations of the KPI analysis engine: series statistics,
//! OLS trend detection, seasonal-residual forecasting, Pearson correlation,
//! driver selection and the orchestrating [`Analyzer`].

pub mod analyzer;
pub mod correlation;
pub mod drivers;
pub mod forecast;
pub mod narrative;
pub mod stats;
pub mod trend;

// Re-export SPI types for implementations
pub use kpi_spi::{
    AnalysisError, AnalysisResult, Direction, DriverPools, DriverSelector, ForecastResult,
    Forecaster, NamedSeries, NarrativeContext, NarrativeGenerator, NarrativeStream, Result,
    SeriesStats, TrendDetector, TrendLabel, TrendResult, TrendThresholds, DEFAULT_HORIZON,
    DRIVER_COUNT,
};

// Re-export main types
pub use analyzer::{Analyzer, KpiRequest};
pub use correlation::{correlation_matrix, pearson_correlation, CorrelationMatrix};
pub use drivers::DriverCatalog;
pub use forecast::SeasonalResidualForecaster;
pub use narrative::{collect_narrative, TemplateNarrator};
pub use stats::series_stats;
pub use trend::LinearTrendDetector;
