//! KPI Facade
//!
//! High-level API for KPI analysis. Re-exports all public types from the
//! analysis stack for convenient usage.

// Re-export everything from API (which includes SPI and core)
pub use kpi_api::*;

// Explicit re-exports for documentation
pub use kpi_api::prelude;

// Re-export free functions at root
pub use kpi_core::correlation::{correlation_matrix, pearson_correlation};
pub use kpi_core::forecast::forecast_with_residuals;
pub use kpi_core::narrative::collect_narrative;
pub use kpi_core::stats::series_stats;
pub use kpi_core::trend::{classify_slope, detect_trend};
