//! Series statistics
//!
//! Mean, extrema and first-to-last percent change of a KPI series.

use kpi_spi::SeriesStats;

/// Compute summary statistics for a series.
///
/// An empty series yields the all-zero record rather than an error.
/// When the first value is zero the percent change divides by 1, so
/// `[0, 5, 10]` reports a change of 1000% (i.e. `last * 100`).
pub fn series_stats(series: &[f64]) -> SeriesStats {
    let (first, last) = match (series.first(), series.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return SeriesStats::default(),
    };

    let avg = series.iter().sum::<f64>() / series.len() as f64;
    let min = series.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = series.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let change_percent = if series.len() > 1 {
        percent_change(first, last)
    } else {
        0.0
    };

    SeriesStats {
        avg,
        min,
        max,
        change_percent,
    }
}

/// `(last - first) / (first || 1) * 100`
pub fn percent_change(first: f64, last: f64) -> f64 {
    let base = if first == 0.0 { 1.0 } else { first };
    (last - first) / base * 100.0
}
