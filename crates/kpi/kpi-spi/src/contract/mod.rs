//! Contract module containing trait definitions for analysis operations

mod driver_selector;
mod forecaster;
mod narrative_generator;
mod trend_detector;

pub use driver_selector::DriverSelector;
pub use forecaster::Forecaster;
pub use narrative_generator::{NarrativeGenerator, NarrativeStream};
pub use trend_detector::TrendDetector;
