//! Serializable settings and explicit chart-output selection.
//!
//! Settings come from a TOML file; every field has a default so a partial
//! file (or none at all) is valid. Lookup order for [`Settings::discover`]:
//! 1. an explicit path (must exist)
//! 2. `./birthlab.toml`
//! 3. `<config_dir>/birthlab/config.toml`
//! 4. built-in defaults

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::stats::{VarianceAssumption, VerdictFormat, DEFAULT_ALPHA};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "birthlab.toml";

/// Errors from loading or validating settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Names of the columns the analyses read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ColumnNames {
    /// Group label column (country / region code).
    pub group: String,
    /// Numeric metric column (birth count).
    pub metric: String,
    /// Period column (year).
    pub period: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            group: "geo".into(),
            metric: "OBS_VALUE".into(),
            period: "TIME_PERIOD".into(),
        }
    }
}

/// Defaults for the two-sample comparison.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HypothesisSettings {
    /// Significance level used when none is entered.
    pub alpha: f64,
    /// Decimal places for alpha in verdicts; `None` prints the shortest form.
    pub alpha_decimals: Option<usize>,
    pub variance: VarianceAssumption,
}

impl Default for HypothesisSettings {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            alpha_decimals: None,
            variance: VarianceAssumption::Pooled,
        }
    }
}

/// Parameters of the distribution views.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DistributionSettings {
    /// Histogram bin count.
    pub bins: usize,
    /// Confidence level for the interval around the mean.
    pub confidence_level: f64,
    /// Outlier cut-off in standard deviations for the cleaned view.
    pub outlier_sigma: f64,
    /// Upper x-axis bound for the raw-count histogram; `None` uses the sample max.
    pub x_max: Option<f64>,
}

impl Default for DistributionSettings {
    fn default() -> Self {
        Self {
            bins: 30,
            confidence_level: 0.95,
            outlier_sigma: 3.0,
            x_max: Some(2_000_000.0),
        }
    }
}

/// Requested chart output, before looking at the terminal.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Draw charts when stdout is a terminal, otherwise print text.
    #[default]
    Auto,
    Terminal,
    Text,
}

/// Resolved chart output, fixed once at startup and passed down explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartOutput {
    Terminal,
    Text,
}

impl RenderMode {
    pub fn resolve(self, stdout_is_terminal: bool) -> ChartOutput {
        match self {
            RenderMode::Terminal => ChartOutput::Terminal,
            RenderMode::Text => ChartOutput::Text,
            RenderMode::Auto if stdout_is_terminal => ChartOutput::Terminal,
            RenderMode::Auto => ChartOutput::Text,
        }
    }
}

impl FromStr for RenderMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(RenderMode::Auto),
            "terminal" => Ok(RenderMode::Terminal),
            "text" => Ok(RenderMode::Text),
            other => Err(ConfigError::Invalid(format!(
                "chart mode '{other}' (expected auto, terminal or text)"
            ))),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RenderMode::Auto => "auto",
            RenderMode::Terminal => "terminal",
            RenderMode::Text => "text",
        })
    }
}

/// Complete tool settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// CSV file with the observations.
    pub data_path: PathBuf,
    pub charts: RenderMode,
    pub columns: ColumnNames,
    pub hypothesis: HypothesisSettings,
    pub distribution: DistributionSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data2.csv"),
            charts: RenderMode::Auto,
            columns: ColumnNames::default(),
            hypothesis: HypothesisSettings::default(),
            distribution: DistributionSettings::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Locate and load settings, falling back to defaults when no file exists.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading explicit config");
            return Self::from_file(path);
        }

        let candidates = [
            Some(PathBuf::from(LOCAL_CONFIG_FILE)),
            dirs::config_dir().map(|d| d.join("birthlab").join("config.toml")),
        ];
        for path in candidates.into_iter().flatten() {
            if path.is_file() {
                debug!(path = %path.display(), "loading discovered config");
                return Self::from_file(&path);
            }
        }

        debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    /// Reject settings no analysis can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let alpha = self.hypothesis.alpha;
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "hypothesis.alpha must be in (0, 1), got {alpha}"
            )));
        }
        let level = self.distribution.confidence_level;
        if !(level > 0.0 && level < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "distribution.confidence_level must be in (0, 1), got {level}"
            )));
        }
        if self.distribution.bins == 0 {
            return Err(ConfigError::Invalid("distribution.bins must be positive".into()));
        }
        if self.distribution.outlier_sigma <= 0.0 || self.distribution.outlier_sigma.is_nan() {
            return Err(ConfigError::Invalid(
                "distribution.outlier_sigma must be positive".into(),
            ));
        }
        if let Some(x_max) = self.distribution.x_max {
            if x_max <= 0.0 || !x_max.is_finite() {
                return Err(ConfigError::Invalid(
                    "distribution.x_max must be a positive number".into(),
                ));
            }
        }
        for (name, value) in [
            ("columns.group", &self.columns.group),
            ("columns.metric", &self.columns.metric),
            ("columns.period", &self.columns.period),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }

    pub fn verdict_format(&self) -> VerdictFormat {
        VerdictFormat {
            alpha_decimals: self.hypothesis.alpha_decimals,
        }
    }

    /// Serialize to TOML (used to print the effective configuration).
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(format!("serialize: {e}")))
    }
}
