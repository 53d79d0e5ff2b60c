//! Numeric grounding handed to the narrative layer

use super::{AnalysisResult, SeriesStats, TrendLabel};
use serde::{Deserialize, Serialize};

/// Everything the external text layer is allowed to see about a KPI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeContext {
    pub kpi_name: String,
    pub trend: TrendLabel,
    pub stats: SeriesStats,
    pub forecast_summary: String,
    pub forecast_mean: f64,
    pub drivers: Vec<String>,
    /// Pearson r against a companion series, when one was compared
    pub correlation: Option<f64>,
}

impl NarrativeContext {
    pub fn from_analysis(
        kpi_name: impl Into<String>,
        analysis: &AnalysisResult,
        correlation: Option<f64>,
    ) -> Self {
        Self {
            kpi_name: kpi_name.into(),
            trend: analysis.trend.label,
            stats: analysis.stats,
            forecast_summary: analysis.forecast.summary.clone(),
            forecast_mean: analysis.forecast.mean(),
            drivers: analysis.drivers.clone(),
            correlation,
        }
    }
}
