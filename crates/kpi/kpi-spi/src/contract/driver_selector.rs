//! Trait for driver selection

use crate::error::Result;
use crate::model::Direction;
use rand::RngCore;

/// Picks candidate explanations for a trend in a KPI category.
pub trait DriverSelector: Send + Sync {
    /// Draw exactly [`DRIVER_COUNT`](crate::DRIVER_COUNT) distinct drivers.
    ///
    /// Fails with `UnknownCategory` when the category has no pools.
    fn select(
        &self,
        category: &str,
        direction: Direction,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<String>>;

    /// Whether pools are registered for `category`
    fn has_category(&self, category: &str) -> bool;
}
