//! KPI Analysis Service Provider Interface
//!
//! Defines the error taxonomy, data model and traits shared by every
//! implementation of the KPI trend/forecast analysis engine.
//!
//! - [`TrendDetector`]: fits a trend line and labels its strength
//! - [`Forecaster`]: projects a fitted trend into the future
//! - [`DriverSelector`]: picks candidate explanations for a trend
//! - [`NarrativeGenerator`]: external text layer fed with numeric grounding
//! - [`AnalysisError`]: standardized error type for all operations

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{DriverSelector, Forecaster, NarrativeGenerator, NarrativeStream, TrendDetector};
pub use error::{AnalysisError, Result};
pub use model::{
    AnalysisResult, Direction, DriverPools, ForecastResult, NamedSeries, NarrativeContext,
    SeriesStats, TrendLabel, TrendResult, TrendThresholds, DEFAULT_HORIZON, DRIVER_COUNT,
};
