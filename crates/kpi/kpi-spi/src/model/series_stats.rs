//! Series statistics model

use serde::{Deserialize, Serialize};

/// Summary statistics of a KPI series
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesStats {
    /// Arithmetic mean
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    /// `(last - first) / (first || 1) * 100`, 0 for fewer than two points
    pub change_percent: f64,
}
