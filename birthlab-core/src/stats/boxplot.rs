//! Box-plot statistics: quartiles, 1.5·IQR whiskers and outliers.

use serde::{Deserialize, Serialize};

use super::descriptive::{percentile_sorted, sorted};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest value at or above `q1 - 1.5·IQR`.
    pub lower_whisker: f64,
    /// Largest value at or below `q3 + 1.5·IQR`.
    pub upper_whisker: f64,
    /// Values beyond the whiskers.
    pub outliers: Vec<f64>,
    pub min: f64,
    pub max: f64,
}

impl BoxStats {
    /// `None` for an empty sample.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let sorted = sorted(values);
        let q1 = percentile_sorted(&sorted, 0.25)?;
        let median = percentile_sorted(&sorted, 0.5)?;
        let q3 = percentile_sorted(&sorted, 0.75)?;
        let iqr = q3 - q1;
        let fence_lo = q1 - 1.5 * iqr;
        let fence_hi = q3 + 1.5 * iqr;

        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|&v| v >= fence_lo)
            .unwrap_or(q1);
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= fence_hi)
            .unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < fence_lo || v > fence_hi)
            .collect();

        Some(Self {
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quartiles_and_whiskers() {
        let stats = BoxStats::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]).unwrap();
        assert_eq!(stats.q1, 3.0);
        assert_eq!(stats.median, 5.0);
        assert_eq!(stats.q3, 7.0);
        assert_eq!(stats.lower_whisker, 1.0);
        assert_eq!(stats.upper_whisker, 9.0);
        assert!(stats.outliers.is_empty());
        assert_eq!(stats.iqr(), 4.0);
    }

    #[test]
    fn far_value_is_an_outlier() {
        let stats = BoxStats::from_values(&[10.0, 11.0, 12.0, 13.0, 100.0]).unwrap();
        assert_eq!(stats.outliers, vec![100.0]);
        assert_eq!(stats.upper_whisker, 13.0);
        assert_eq!(stats.max, 100.0);
    }

    #[test]
    fn empty_sample() {
        assert!(BoxStats::from_values(&[]).is_none());
    }
}
