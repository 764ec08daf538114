//! Distribution helpers backed by `statrs`.

use statrs::distribution::{Continuous, ContinuousCDF, Normal, StudentsT};

use super::compare::Alternative;
use super::error::StatsError;

/// Standard Student's t distribution with `df` degrees of freedom.
pub fn student_t(df: f64) -> Result<StudentsT, StatsError> {
    StudentsT::new(0.0, 1.0, df)
        .map_err(|e| StatsError::InvalidParameter(format!("Student's t with df = {df}: {e}")))
}

/// Normal distribution with the given mean and standard deviation.
pub fn normal(mean: f64, std_dev: f64) -> Result<Normal, StatsError> {
    Normal::new(mean, std_dev).map_err(|e| {
        StatsError::InvalidParameter(format!("normal with mean = {mean}, sd = {std_dev}: {e}"))
    })
}

/// p-value of a t statistic for the given tail direction.
///
/// Upper tails use the survival function directly, so small p-values keep
/// their precision. Infinite `t` gives the limiting tail probability; NaN is
/// rejected before it reaches statrs.
pub fn t_test_p_value(t: f64, df: f64, alternative: Alternative) -> Result<f64, StatsError> {
    if t.is_nan() {
        return Err(StatsError::InvalidParameter(
            "t statistic is NaN; no p-value".to_string(),
        ));
    }
    let dist = student_t(df)?;
    if t.is_infinite() {
        let upper = if t > 0.0 { 0.0 } else { 1.0 };
        return Ok(match alternative {
            Alternative::Greater => upper,
            Alternative::Less => 1.0 - upper,
            Alternative::TwoSided => 0.0,
        });
    }
    let p = match alternative {
        Alternative::Greater => dist.sf(t),
        Alternative::Less => dist.cdf(t),
        Alternative::TwoSided => (2.0 * dist.sf(t.abs())).min(1.0),
    };
    Ok(p)
}

/// Two-sided critical value `z` with `P(|Z| <= z) = level`.
pub fn z_critical(level: f64) -> Result<f64, StatsError> {
    if !(level > 0.0 && level < 1.0) {
        return Err(StatsError::InvalidParameter(format!(
            "confidence level must be in (0, 1), got {level}"
        )));
    }
    let alpha = 1.0 - level;
    Ok(normal(0.0, 1.0)?.inverse_cdf(1.0 - alpha / 2.0))
}

/// `points` evenly spaced samples of the normal pdf over `[lo, hi]`.
pub fn normal_curve(
    mean: f64,
    std_dev: f64,
    lo: f64,
    hi: f64,
    points: usize,
) -> Result<Vec<(f64, f64)>, StatsError> {
    let dist = normal(mean, std_dev)?;
    if points < 2 || !(hi > lo) {
        return Err(StatsError::InvalidParameter(format!(
            "normal curve needs lo < hi and at least 2 points (got [{lo}, {hi}], {points})"
        )));
    }
    let step = (hi - lo) / (points - 1) as f64;
    Ok((0..points)
        .map(|i| {
            let x = lo + step * i as f64;
            (x, dist.pdf(x))
        })
        .collect())
}
