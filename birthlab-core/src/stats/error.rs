use thiserror::Error;

use crate::data::TableError;

/// Errors from the statistics layer.
///
/// All are local validation failures; retrying with the same input fails the
/// same way. Callers present them and re-prompt.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("group '{group}' has no non-missing values")]
    EmptySample { group: String },

    #[error("group '{group}' not found in column '{column}'")]
    UnknownGroup { group: String, column: String },

    #[error("significance level must be in (0, 1), got {0}")]
    InvalidAlpha(f64),

    #[error("malformed comparison result: {0}")]
    MalformedResult(String),

    #[error("group '{group}' has {size} value(s); the t-test needs at least {required}")]
    SampleTooSmall {
        group: String,
        size: usize,
        required: usize,
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Table(#[from] TableError),
}
