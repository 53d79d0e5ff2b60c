//! Pearson correlation between KPI series

use kpi_spi::NamedSeries;
use rayon::prelude::*;
use serde::Serialize;
use tracing::warn;

/// Pearson correlation coefficient of two series.
///
/// Only the first `min(x.len(), y.len())` values of each are used. Returns
/// 0 when that prefix is empty, exactly 1 when both prefixes are identical
/// (a series always matches itself, even a flat one), and 0 when either
/// side otherwise has zero variance. The result is symmetric and always
/// within `[-1, 1]`.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 {
        return 0.0;
    }
    let (x, y) = (&x[..n], &y[..n]);

    if x == y {
        return 1.0;
    }
    if is_constant(x) || is_constant(y) {
        return 0.0;
    }

    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (xi, yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return 0.0;
    }

    // Separate roots keep the product from overflowing for large magnitudes
    let r = cov / (var_x.sqrt() * var_y.sqrt());
    if !r.is_finite() {
        warn!(n, "correlation is not finite, reporting 0");
        return 0.0;
    }
    r.clamp(-1.0, 1.0)
}

fn is_constant(values: &[f64]) -> bool {
    values.iter().all(|v| *v == values[0])
}

/// Symmetric pairwise correlation matrix across named series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub names: Vec<String>,
    /// `values[i][j]` is the correlation of series `i` with series `j`
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Correlation between two series by name
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.names.iter().position(|n| n == a)?;
        let j = self.names.iter().position(|n| n == b)?;
        Some(self.values[i][j])
    }

    /// Off-diagonal pairs ordered by decreasing absolute correlation
    pub fn strongest_pairs(&self) -> Vec<(String, String, f64)> {
        let mut pairs = Vec::new();
        for i in 0..self.names.len() {
            for j in (i + 1)..self.names.len() {
                pairs.push((self.names[i].clone(), self.names[j].clone(), self.values[i][j]));
            }
        }
        pairs.sort_by(|a, b| b.2.abs().total_cmp(&a.2.abs()));
        pairs
    }
}

/// Compute the correlation of every pair of series, in parallel by row
pub fn correlation_matrix(series: &[NamedSeries]) -> CorrelationMatrix {
    let values: Vec<Vec<f64>> = series
        .par_iter()
        .map(|a| {
            series
                .iter()
                .map(|b| pearson_correlation(&a.values, &b.values))
                .collect::<Vec<f64>>()
        })
        .collect();

    CorrelationMatrix {
        names: series.iter().map(|s| s.name.clone()).collect(),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_positive() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![2.0, 4.0, 6.0, 8.0, 10.0];
        assert!((pearson_correlation(&x, &y) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_perfect_negative() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![10.0, 8.0, 6.0, 4.0, 2.0];
        assert!((pearson_correlation(&x, &y) + 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_self_correlation_is_exactly_one() {
        let x = vec![0.1, 0.7, 0.3, 0.9, 0.2];
        assert_eq!(pearson_correlation(&x, &x), 1.0);
    }

    #[test]
    fn test_zero_variance() {
        assert_eq!(pearson_correlation(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(pearson_correlation(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0]), 0.0);
        assert_eq!(pearson_correlation(&[5.0, 5.0], &[7.0, 7.0]), 0.0);
    }

    #[test]
    fn test_flat_series_matches_itself() {
        assert_eq!(pearson_correlation(&[100.0; 30], &[100.0; 30]), 1.0);
    }

    #[test]
    fn test_large_magnitudes_stay_finite() {
        let x = vec![1e110, 2e110, 3e110, 4e110];
        let up = vec![2e110, 4e110, 6e110, 8e110];
        let down = vec![8e110, 6e110, 4e110, 2e110];
        assert!((pearson_correlation(&x, &up) - 1.0).abs() < 1e-10);
        assert!((pearson_correlation(&x, &down) + 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(pearson_correlation(&[], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_truncates_to_shorter() {
        let x = vec![1.0, 2.0, 3.0];
        let y = vec![1.0, 2.0, 3.0, -50.0, 80.0];
        assert_eq!(pearson_correlation(&x, &y), 1.0);
    }

    #[test]
    fn test_symmetric_and_bounded() {
        let x = vec![3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        let y = vec![2.0, 7.0, 1.0, 8.0, 2.0, 8.0, 1.0, 8.0];
        let r_xy = pearson_correlation(&x, &y);
        let r_yx = pearson_correlation(&y, &x);
        assert_eq!(r_xy, r_yx);
        assert!((-1.0..=1.0).contains(&r_xy));
    }

    #[test]
    fn test_matrix() {
        let series = vec![
            NamedSeries::new("revenue", vec![1.0, 2.0, 3.0, 4.0]),
            NamedSeries::new("costs", vec![4.0, 3.0, 2.0, 1.0]),
            NamedSeries::new("flat", vec![7.0; 4]),
        ];
        let matrix = correlation_matrix(&series);

        assert_eq!(matrix.values.len(), 3);
        assert_eq!(matrix.get("revenue", "revenue"), Some(1.0));
        assert_eq!(matrix.get("flat", "flat"), Some(1.0));
        assert_eq!(matrix.get("flat", "costs"), Some(0.0));
        assert!((matrix.get("revenue", "costs").unwrap() + 1.0).abs() < 1e-10);
        assert_eq!(matrix.get("revenue", "costs"), matrix.get("costs", "revenue"));
        assert_eq!(matrix.get("revenue", "missing"), None);

        let pairs = matrix.strongest_pairs();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0].0, "revenue");
        assert_eq!(pairs[0].1, "costs");
    }
}
