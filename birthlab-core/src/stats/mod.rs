//! Statistics over observation-table samples.
//!
//! - `compare`: two-sample t-test between two group labels
//! - `interpret`: verdict text for a comparison result
//! - `input`: shell input parsing with documented fallbacks
//! - `descriptive`: summary statistics and percentiles
//! - `distribution`: Student's t and normal distribution helpers (statrs)
//! - `transform`: outlier trimming and log transform
//! - `interval`: z confidence interval for the mean
//! - `histogram`: equal-width density histogram
//! - `boxplot`: quartiles, whiskers and outliers for box plots

pub mod boxplot;
pub mod compare;
pub mod descriptive;
pub mod distribution;
pub mod error;
pub mod histogram;
pub mod input;
pub mod interpret;
pub mod interval;
pub mod transform;

pub use boxplot::BoxStats;
pub use compare::{
    compare, compare_samples, Alternative, ComparisonRequest, ComparisonResult, TestOptions,
    VarianceAssumption, DEFAULT_ALPHA, MIN_SAMPLE_SIZE,
};
pub use descriptive::Summary;
pub use error::StatsError;
pub use histogram::Histogram;
pub use input::{parse_alpha_or_default, AlphaInput};
pub use interpret::{interpret, interpret_default, report, VerdictFormat};
pub use interval::ConfidenceInterval;
pub use transform::{log1p_transform, trim_outliers, CleanedDistribution};
