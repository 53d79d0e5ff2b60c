//! Model module containing data structures

mod analysis_result;
mod driver_pools;
mod forecast_result;
mod narrative_context;
mod series_stats;
mod trend;

pub use analysis_result::{AnalysisResult, NamedSeries};
pub use driver_pools::{DriverPools, DRIVER_COUNT};
pub use forecast_result::{ForecastResult, DEFAULT_HORIZON};
pub use narrative_context::NarrativeContext;
pub use series_stats::SeriesStats;
pub use trend::{Direction, TrendLabel, TrendResult, TrendThresholds};
