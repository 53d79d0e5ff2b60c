//! Forecast result model

use serde::{Deserialize, Serialize};

/// Forecast horizon used when the caller does not supply one
pub const DEFAULT_HORIZON: usize = 7;

/// Projected values beyond the observed series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// One value per forecast step; length equals the requested horizon
    pub values: Vec<f64>,
    /// Human-readable description referencing the mean forecast value
    pub summary: String,
}

impl ForecastResult {
    /// Mean of the forecast values, 0 when empty
    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    pub fn horizon(&self) -> usize {
        self.values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        let forecast = ForecastResult {
            values: vec![10.0, 20.0, 30.0],
            summary: String::new(),
        };
        assert!((forecast.mean() - 20.0).abs() < 1e-10);
        assert_eq!(forecast.horizon(), 3);
    }

    #[test]
    fn test_mean_empty() {
        let forecast = ForecastResult {
            values: vec![],
            summary: String::new(),
        };
        assert_eq!(forecast.mean(), 0.0);
    }
}
