//! Outlier trimming and log transform for the cleaned distribution view.

use statrs::statistics::Statistics;

use super::error::StatsError;

/// Keep values strictly within `mean ± k·sd` (sample sd).
///
/// With fewer than two values, or a constant sample, the band is empty or
/// undefined and nothing is kept.
pub fn trim_outliers(values: &[f64], k: f64) -> Vec<f64> {
    if values.len() < 2 {
        return Vec::new();
    }
    let mean = values.iter().mean();
    let sd = values.iter().std_dev();
    let lo = mean - k * sd;
    let hi = mean + k * sd;
    values.iter().copied().filter(|&v| v > lo && v < hi).collect()
}

/// `ln(1 + x)` of every value. Values at or below -1 have no logarithm.
pub fn log1p_transform(values: &[f64]) -> Result<Vec<f64>, StatsError> {
    values
        .iter()
        .map(|&v| {
            if v > -1.0 {
                Ok(v.ln_1p())
            } else {
                Err(StatsError::InvalidParameter(format!(
                    "log1p undefined for {v}"
                )))
            }
        })
        .collect()
}

/// Trimmed, log-transformed sample with a fitted normal.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedDistribution {
    /// `ln(1 + x)` of the values that survived trimming.
    pub values: Vec<f64>,
    /// Number of values removed as outliers.
    pub removed: usize,
    /// Mean of the transformed values.
    pub mu: f64,
    /// Sample standard deviation of the transformed values.
    pub sigma: f64,
}

impl CleanedDistribution {
    /// Trim at `k` standard deviations, log-transform, fit a normal.
    pub fn analyze(values: &[f64], k: f64) -> Result<Self, StatsError> {
        if !(k > 0.0) {
            return Err(StatsError::InvalidParameter(format!(
                "outlier cut-off must be positive, got {k}"
            )));
        }
        let kept = trim_outliers(values, k);
        let transformed = log1p_transform(&kept)?;
        if transformed.len() < 2 {
            return Err(StatsError::InvalidParameter(format!(
                "{} value(s) left after trimming; need at least 2 to fit a normal",
                transformed.len()
            )));
        }
        let mu = transformed.iter().mean();
        let sigma = transformed.iter().std_dev();
        Ok(Self {
            removed: values.len() - kept.len(),
            values: transformed,
            mu,
            sigma,
        })
    }
}
