//! Summary statistics.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Count, mean, sample standard deviation and range of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator); `None` below two values.
    pub std_dev: Option<f64>,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    /// Summarize `values`; `None` for an empty sample.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let std_dev = (values.len() >= 2).then(|| values.iter().std_dev());
        Some(Self {
            count: values.len(),
            mean: values.iter().mean(),
            std_dev,
            min: Statistics::min(values.iter()),
            max: Statistics::max(values.iter()),
        })
    }
}

/// Copy of `values` sorted ascending (NaN-tolerant).
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// Percentile of an ascending slice with linear interpolation between ranks.
///
/// `p` is a fraction in `[0, 1]`. Returns `None` for an empty slice.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let p = p.clamp(0.0, 1.0);
    let rank = p * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_sample() {
        let s = Summary::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(s.count, 8);
        assert!((s.mean - 5.0).abs() < 1e-12);
        // sample sd with n - 1 = 7
        assert!((s.std_dev.unwrap() - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 9.0);
    }

    #[test]
    fn single_value_has_no_std_dev() {
        let s = Summary::from_values(&[3.0]).unwrap();
        assert_eq!(s.std_dev, None);
        assert_eq!(s.mean, 3.0);
    }

    #[test]
    fn empty_sample_has_no_summary() {
        assert!(Summary::from_values(&[]).is_none());
    }

    #[test]
    fn percentile_interpolates() {
        let values = sorted(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(percentile_sorted(&values, 0.0), Some(1.0));
        assert_eq!(percentile_sorted(&values, 1.0), Some(4.0));
        assert_eq!(percentile_sorted(&values, 0.5), Some(2.5));
        assert_eq!(percentile_sorted(&values, 0.25), Some(1.75));
        assert_eq!(percentile_sorted(&[], 0.5), None);
    }
}
