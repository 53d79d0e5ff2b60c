//! Driver candidate pools

use crate::error::{AnalysisError, Result};
use serde::Serialize;

/// Number of drivers returned for every selection
pub const DRIVER_COUNT: usize = 2;

const MAX_POOL_SIZE: usize = 3;

/// Candidate explanations for one KPI category, split by trend direction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverPools {
    positive: Vec<String>,
    negative: Vec<String>,
}

impl DriverPools {
    /// Build pools, checking each holds 2-3 distinct, non-empty entries.
    pub fn new<P, N, S>(positive: P, negative: N) -> Result<Self>
    where
        P: IntoIterator<Item = S>,
        N: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let positive: Vec<String> = positive.into_iter().map(Into::into).collect();
        let negative: Vec<String> = negative.into_iter().map(Into::into).collect();
        validate_pool("positive", &positive)?;
        validate_pool("negative", &negative)?;
        Ok(Self { positive, negative })
    }

    pub fn positive(&self) -> &[String] {
        &self.positive
    }

    pub fn negative(&self) -> &[String] {
        &self.negative
    }

    /// Both pools with duplicates across them removed, positive first
    pub fn union(&self) -> Vec<String> {
        let mut all = self.positive.clone();
        for driver in &self.negative {
            if !all.contains(driver) {
                all.push(driver.clone());
            }
        }
        all
    }

    pub fn contains(&self, driver: &str) -> bool {
        self.positive.iter().chain(self.negative.iter()).any(|d| d == driver)
    }
}

fn validate_pool(kind: &str, pool: &[String]) -> Result<()> {
    if pool.len() < DRIVER_COUNT || pool.len() > MAX_POOL_SIZE {
        return Err(AnalysisError::invalid(format!(
            "{} driver pool must hold {}-{} entries, got {}",
            kind,
            DRIVER_COUNT,
            MAX_POOL_SIZE,
            pool.len()
        )));
    }
    if pool.iter().any(|d| d.trim().is_empty()) {
        return Err(AnalysisError::invalid(format!(
            "{} driver pool contains an empty entry",
            kind
        )));
    }
    for (i, driver) in pool.iter().enumerate() {
        if pool[..i].contains(driver) {
            return Err(AnalysisError::invalid(format!(
                "{} driver pool contains duplicate '{}'",
                kind, driver
            )));
        }
    }
    Ok(())
}
