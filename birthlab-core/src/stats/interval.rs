//! Normal-approximation confidence interval for a mean.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use super::distribution::z_critical;
use super::error::StatsError;

/// `mean ± z · sd / sqrt(n)` at the given confidence level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub level: f64,
    pub n: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub z: f64,
    pub margin: f64,
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    pub fn for_mean(values: &[f64], level: f64) -> Result<Self, StatsError> {
        if values.len() < 2 {
            return Err(StatsError::InvalidParameter(format!(
                "confidence interval needs at least 2 values, got {}",
                values.len()
            )));
        }
        let z = z_critical(level)?;
        let n = values.len();
        let mean = values.iter().mean();
        let std_dev = values.iter().std_dev();
        let margin = z * std_dev / (n as f64).sqrt();
        Ok(Self {
            level,
            n,
            mean,
            std_dev,
            z,
            margin,
            lower: mean - margin,
            upper: mean + margin,
        })
    }

    /// Interval bounds clipped to `[lo, hi]` for shading a chart.
    pub fn clamped(&self, lo: f64, hi: f64) -> (f64, f64) {
        (self.lower.max(lo), self.upper.min(hi))
    }
}
