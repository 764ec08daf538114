//! Two-sample comparator.
//!
//! Filters the metric values of two group labels out of an observation
//! table and runs an independent two-sample t-test on them.
//!
//! The variance assumption is explicit. [`VarianceAssumption::Pooled`] (the
//! default) is Student's equal-variance test:
//!
//! ```text
//! df  = n1 + n2 - 2
//! sp² = ((n1 - 1)·s1² + (n2 - 1)·s2²) / df
//! se  = sqrt(sp² · (1/n1 + 1/n2))
//! ```
//!
//! [`VarianceAssumption::Welch`] uses `se = sqrt(s1²/n1 + s2²/n2)` with
//! Welch–Satterthwaite degrees of freedom. In both cases `t = (mean1 - mean2) / se`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use tracing::{debug, warn};

use super::distribution::t_test_p_value;
use super::error::StatsError;
use crate::data::{GroupSample, ObservationTable};

/// Significance level used when none is given or the input is unusable.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Smallest per-group sample for which the sample variance is defined.
pub const MIN_SAMPLE_SIZE: usize = 2;

/// Tail direction of the alternative hypothesis (group1 relative to group2).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alternative {
    /// mean1 ≠ mean2
    #[default]
    TwoSided,
    /// mean1 > mean2
    Greater,
    /// mean1 < mean2
    Less,
}

impl Alternative {
    pub const ALL: [Alternative; 3] = [
        Alternative::TwoSided,
        Alternative::Greater,
        Alternative::Less,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Alternative::TwoSided => "two-sided",
            Alternative::Greater => "greater",
            Alternative::Less => "less",
        }
    }

    /// Menu label, e.g. `Two-sided (≠)`.
    pub fn label(self) -> &'static str {
        match self {
            Alternative::TwoSided => "Two-sided (≠)",
            Alternative::Greater => "Greater than (>)",
            Alternative::Less => "Less than (<)",
        }
    }

    /// The direction that states the same hypothesis with the groups swapped.
    pub fn flipped(self) -> Self {
        match self {
            Alternative::TwoSided => Alternative::TwoSided,
            Alternative::Greater => Alternative::Less,
            Alternative::Less => Alternative::Greater,
        }
    }

    /// Parse a direction, falling back to two-sided for anything unrecognised.
    pub fn from_choice_or_default(choice: &str) -> Self {
        choice.parse().unwrap_or_else(|_| {
            warn!(choice, "invalid test direction, defaulting to two-sided");
            Alternative::TwoSided
        })
    }
}

impl FromStr for Alternative {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "two-sided" | "twosided" | "two" | "!=" | "≠" => Ok(Alternative::TwoSided),
            "greater" | ">" => Ok(Alternative::Greater),
            "less" | "<" => Ok(Alternative::Less),
            _ => Alternative::ALL
                .into_iter()
                .find(|alt| alt.label().eq_ignore_ascii_case(s.trim()))
                .ok_or_else(|| {
                    StatsError::InvalidParameter(format!(
                        "test direction '{s}' (expected two-sided, greater or less)"
                    ))
                }),
        }
    }
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variance assumption of the t-test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarianceAssumption {
    /// Equal variances, pooled estimate (Student).
    #[default]
    Pooled,
    /// Unequal variances (Welch).
    Welch,
}

impl fmt::Display for VarianceAssumption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VarianceAssumption::Pooled => "pooled",
            VarianceAssumption::Welch => "welch",
        })
    }
}

/// Test parameters independent of where the samples come from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestOptions {
    pub alternative: Alternative,
    pub alpha: f64,
    pub variance: VarianceAssumption,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            alternative: Alternative::TwoSided,
            alpha: DEFAULT_ALPHA,
            variance: VarianceAssumption::Pooled,
        }
    }
}

/// Which two groups of which columns to compare, and how.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRequest {
    pub metric: String,
    pub group_col: String,
    pub group1: String,
    pub group2: String,
    pub options: TestOptions,
}

impl ComparisonRequest {
    pub fn new(
        metric: impl Into<String>,
        group_col: impl Into<String>,
        group1: impl Into<String>,
        group2: impl Into<String>,
    ) -> Self {
        Self {
            metric: metric.into(),
            group_col: group_col.into(),
            group1: group1.into(),
            group2: group2.into(),
            options: TestOptions::default(),
        }
    }

    pub fn alternative(mut self, alternative: Alternative) -> Self {
        self.options.alternative = alternative;
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.options.alpha = alpha;
        self
    }

    pub fn variance(mut self, variance: VarianceAssumption) -> Self {
        self.options.variance = variance;
        self
    }
}

/// Outcome of one comparison. Built once, never mutated.
///
/// `significant == (p_value < alpha)` always holds for results produced by
/// [`compare`]. The provenance fields default when deserializing so a result
/// carrying only the six core keys is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub group1_mean: f64,
    pub group2_mean: f64,
    /// `±inf` when both samples are constant with different means.
    pub t_statistic: f64,
    pub p_value: f64,
    pub significant: bool,
    pub alpha: f64,
    #[serde(default)]
    pub group1: String,
    #[serde(default)]
    pub group2: String,
    #[serde(default)]
    pub n1: usize,
    #[serde(default)]
    pub n2: usize,
    #[serde(default)]
    pub degrees_of_freedom: f64,
    #[serde(default)]
    pub alternative: Alternative,
    #[serde(default)]
    pub variance: VarianceAssumption,
}

impl ComparisonResult {
    /// Check the internal consistency a verdict relies on.
    pub fn validate(&self) -> Result<(), StatsError> {
        if !(0.0..=1.0).contains(&self.p_value) {
            return Err(StatsError::MalformedResult(format!(
                "p-value {} is not a probability",
                self.p_value
            )));
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(StatsError::MalformedResult(format!(
                "alpha {} is outside (0, 1)",
                self.alpha
            )));
        }
        if self.significant != (self.p_value < self.alpha) {
            return Err(StatsError::MalformedResult(format!(
                "significant = {} contradicts p = {} and alpha = {}",
                self.significant, self.p_value, self.alpha
            )));
        }
        Ok(())
    }

    /// Parse a result from JSON. Missing keys and inconsistent values are
    /// reported as [`StatsError::MalformedResult`].
    pub fn from_json(json: &str) -> Result<Self, StatsError> {
        let result: ComparisonResult =
            serde_json::from_str(json).map_err(|e| StatsError::MalformedResult(e.to_string()))?;
        result.validate()?;
        Ok(result)
    }

    pub fn to_json(&self) -> Result<String, StatsError> {
        serde_json::to_string_pretty(self).map_err(|e| StatsError::MalformedResult(e.to_string()))
    }
}

/// Compare the metric of two group labels in `table`.
///
/// Checks run in this order: alpha range, column names, label presence
/// (`UnknownGroup`), non-missing values (`EmptySample`), sample size
/// (`SampleTooSmall`). Group 1 is checked before group 2.
pub fn compare(
    table: &ObservationTable,
    request: &ComparisonRequest,
) -> Result<ComparisonResult, StatsError> {
    validate_alpha(request.options.alpha)?;
    let sample1 = extract_sample(table, request, &request.group1)?;
    let sample2 = extract_sample(table, request, &request.group2)?;
    compare_samples(&sample1, &sample2, &request.options)
}

/// Run the t-test on two already-extracted samples.
pub fn compare_samples(
    sample1: &GroupSample,
    sample2: &GroupSample,
    options: &TestOptions,
) -> Result<ComparisonResult, StatsError> {
    validate_alpha(options.alpha)?;
    for sample in [sample1, sample2] {
        if sample.is_empty() {
            return Err(StatsError::EmptySample {
                group: sample.label().to_string(),
            });
        }
        if sample.len() < MIN_SAMPLE_SIZE {
            return Err(StatsError::SampleTooSmall {
                group: sample.label().to_string(),
                size: sample.len(),
                required: MIN_SAMPLE_SIZE,
            });
        }
    }

    let n1 = sample1.len();
    let n2 = sample2.len();
    let mean1 = sample1.values().iter().mean();
    let mean2 = sample2.values().iter().mean();
    let var1 = sample1.values().iter().variance();
    let var2 = sample2.values().iter().variance();

    for (sample, mean, var) in [(sample1, mean1, var1), (sample2, mean2, var2)] {
        if !mean.is_finite() || !var.is_finite() {
            return Err(StatsError::MalformedResult(format!(
                "group '{}' has non-finite mean or variance (mean = {mean}, variance = {var})",
                sample.label()
            )));
        }
    }

    let (std_err, df) = standard_error(n1, var1, n2, var2, options.variance);
    let diff = mean1 - mean2;
    let undefined = |what: String| {
        StatsError::MalformedResult(format!(
            "{what} comparing '{}' and '{}'",
            sample1.label(),
            sample2.label()
        ))
    };
    if !std_err.is_finite() || !diff.is_finite() {
        return Err(undefined(format!(
            "non-finite standard error or mean difference (se = {std_err}, diff = {diff})"
        )));
    }

    let (t_statistic, p_value, degrees_of_freedom) = if std_err > 0.0 {
        let t = diff / std_err;
        if !t.is_finite() {
            return Err(undefined(format!("non-finite t statistic ({t})")));
        }
        (t, t_test_p_value(t, df, options.alternative)?, df)
    } else {
        // Both samples constant: t is ±inf unless the means coincide.
        if diff == 0.0 {
            return Err(StatsError::MalformedResult(format!(
                "groups '{}' and '{}' are constant and equal; t is undefined",
                sample1.label(),
                sample2.label()
            )));
        }
        let t = diff.signum() * f64::INFINITY;
        let p = match options.alternative {
            Alternative::TwoSided => 0.0,
            Alternative::Greater if t > 0.0 => 0.0,
            Alternative::Less if t < 0.0 => 0.0,
            _ => 1.0,
        };
        (t, p, (n1 + n2 - 2) as f64)
    };

    if p_value.is_nan() {
        return Err(undefined(format!("non-numeric p-value (t = {t_statistic})")));
    }

    let significant = p_value < options.alpha;
    debug!(
        group1 = sample1.label(),
        group2 = sample2.label(),
        n1,
        n2,
        t = t_statistic,
        p = p_value,
        df = degrees_of_freedom,
        alternative = %options.alternative,
        variance = %options.variance,
        significant,
        "two-sample t-test"
    );

    Ok(ComparisonResult {
        group1_mean: mean1,
        group2_mean: mean2,
        t_statistic,
        p_value,
        significant,
        alpha: options.alpha,
        group1: sample1.label().to_string(),
        group2: sample2.label().to_string(),
        n1,
        n2,
        degrees_of_freedom,
        alternative: options.alternative,
        variance: options.variance,
    })
}

fn validate_alpha(alpha: f64) -> Result<(), StatsError> {
    if alpha > 0.0 && alpha < 1.0 {
        Ok(())
    } else {
        Err(StatsError::InvalidAlpha(alpha))
    }
}

fn extract_sample(
    table: &ObservationTable,
    request: &ComparisonRequest,
    label: &str,
) -> Result<GroupSample, StatsError> {
    let sample = table.group_sample(&request.metric, &request.group_col, label)?;
    if sample.is_empty() {
        // No matching rows at all means the label is unknown; matching rows
        // that are all missing give an empty sample.
        if sample.missing() == 0 {
            return Err(StatsError::UnknownGroup {
                group: label.to_string(),
                column: request.group_col.clone(),
            });
        }
        return Err(StatsError::EmptySample {
            group: label.to_string(),
        });
    }
    Ok(sample)
}

/// Standard error of the mean difference and its degrees of freedom.
fn standard_error(
    n1: usize,
    var1: f64,
    n2: usize,
    var2: f64,
    variance: VarianceAssumption,
) -> (f64, f64) {
    let (n1f, n2f) = (n1 as f64, n2 as f64);
    match variance {
        VarianceAssumption::Pooled => {
            let df = n1f + n2f - 2.0;
            let pooled = ((n1f - 1.0) * var1 + (n2f - 1.0) * var2) / df;
            ((pooled * (1.0 / n1f + 1.0 / n2f)).sqrt(), df)
        }
        VarianceAssumption::Welch => {
            let q1 = var1 / n1f;
            let q2 = var2 / n2f;
            let se2 = q1 + q2;
            let df = se2 * se2 / (q1 * q1 / (n1f - 1.0) + q2 * q2 / (n2f - 1.0));
            (se2.sqrt(), df)
        }
    }
}
