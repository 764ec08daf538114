//! BirthLab Core: observation table, aggregates, configuration and statistics.
//!
//! This crate contains everything that is not terminal I/O:
//! - Observation table loaded from a flat CSV file
//! - Aggregates (per-year totals, per-country totals, top-N, country codes)
//! - Settings loaded from TOML with explicit chart-output selection
//! - Two-sample comparator (pooled or Welch t-test) and verdict interpreter
//! - Distribution helpers (summary, outlier trimming, log transform,
//!   confidence interval, density histogram, normal overlay, box statistics)
//!
//! All operations are pure, synchronous functions over owned data.

pub mod config;
pub mod data;
pub mod stats;

pub use config::{ChartOutput, ColumnNames, ConfigError, RenderMode, Settings};
pub use data::{load_table, ObservationTable, TableError};
pub use stats::{
    compare, compare_samples, interpret, interpret_default, parse_alpha_or_default, AlphaInput,
    Alternative, ComparisonRequest, ComparisonResult, StatsError, VarianceAssumption,
    VerdictFormat,
};
