//! Analysis result model

use super::{ForecastResult, SeriesStats, TrendResult};
use serde::{Deserialize, Serialize};

/// Complete analysis of a single KPI series.
///
/// Built fresh per request and owned by the caller; never mutated after
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// The analysed series, as supplied
    pub data: Vec<f64>,
    pub stats: SeriesStats,
    pub trend: TrendResult,
    pub forecast: ForecastResult,
    /// Exactly two candidate explanations for the trend
    pub drivers: Vec<String>,
}

/// A KPI series tagged with its display name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSeries {
    pub name: String,
    pub values: Vec<f64>,
}

impl NamedSeries {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}
