//! Equal-width histogram with density normalisation.
//!
//! Bins are half-open `[e_i, e_{i+1})` except the last, which is closed.
//! Values outside the range are ignored. Densities are `count / (total · width)`,
//! so the bar areas sum to one.

use super::error::StatsError;

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` ascending edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    pub densities: Vec<f64>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins over `range` (default: sample min..max).
    pub fn density(
        values: &[f64],
        bins: usize,
        range: Option<(f64, f64)>,
    ) -> Result<Self, StatsError> {
        if bins == 0 {
            return Err(StatsError::InvalidParameter("histogram needs at least one bin".into()));
        }
        if values.is_empty() {
            return Err(StatsError::InvalidParameter("histogram of an empty sample".into()));
        }

        let (mut lo, mut hi) = match range {
            Some(r) => r,
            None => values
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                    (lo.min(v), hi.max(v))
                }),
        };
        if !(lo.is_finite() && hi.is_finite()) || lo > hi {
            return Err(StatsError::InvalidParameter(format!(
                "invalid histogram range [{lo}, {hi}]"
            )));
        }
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

        let mut counts = vec![0usize; bins];
        for &v in values {
            if v < lo || v > hi {
                continue;
            }
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        let total: usize = counts.iter().sum();
        let densities = counts
            .iter()
            .map(|&c| {
                if total == 0 {
                    0.0
                } else {
                    c as f64 / (total as f64 * width)
                }
            })
            .collect();

        Ok(Self {
            edges,
            counts,
            densities,
        })
    }

    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    pub fn bin_centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
    }

    pub fn max_density(&self) -> f64 {
        self.densities.iter().copied().fold(0.0, f64::max)
    }

    pub fn range(&self) -> (f64, f64) {
        (self.edges[0], self.edges[self.edges.len() - 1])
    }
}
