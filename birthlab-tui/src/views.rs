//! Chart-ready analyses built from the observation table.
//!
//! Each view is computed once when a screen opens and then only read by the
//! renderers, so the widgets never touch the table or the settings.

use birthlab_core::data::{country_codes, metric_values, top_n, totals_by, totals_by_period, totals_for, Totals};
use birthlab_core::stats::distribution::normal_curve;
use birthlab_core::stats::{
    compare, report, Alternative, BoxStats, CleanedDistribution, ComparisonRequest,
    ComparisonResult, ConfidenceInterval, Histogram, StatsError, Summary,
};
use birthlab_core::{ObservationTable, Settings, TableError};

/// Number of countries in the top-N chart.
pub const TOP_COUNTRIES: usize = 10;

/// Points sampled along fitted normal curves.
const CURVE_POINTS: usize = 200;

/// Births per year.
pub fn trend(table: &ObservationTable, settings: &Settings) -> Result<Totals, TableError> {
    totals_by_period(table, &settings.columns)
}

/// Total births of the selected countries, largest first.
pub fn selected_countries(
    table: &ObservationTable,
    settings: &Settings,
    codes: &[String],
) -> Result<Totals, TableError> {
    totals_for(table, &settings.columns, codes)
}

/// The `n` countries with the most births. Aggregate regions are left out.
pub fn top_countries(
    table: &ObservationTable,
    settings: &Settings,
    n: usize,
) -> Result<Totals, TableError> {
    let codes = country_codes(table, &settings.columns.group)?;
    let totals: Totals = totals_by(table, &settings.columns.group, &settings.columns.metric)?
        .into_iter()
        .filter(|(key, _)| codes.binary_search(key).is_ok())
        .collect();
    Ok(top_n(&totals, n))
}

/// Outlier-trimmed, log-transformed counts with a fitted normal.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedView {
    pub cleaned: CleanedDistribution,
    pub histogram: Histogram,
    pub curve: Vec<(f64, f64)>,
}

impl CleanedView {
    pub fn build(table: &ObservationTable, settings: &Settings) -> Result<Self, StatsError> {
        let values = metric_values(table, &settings.columns.metric)?;
        let cleaned = CleanedDistribution::analyze(&values, settings.distribution.outlier_sigma)?;
        let histogram = Histogram::density(&cleaned.values, settings.distribution.bins, None)?;
        let (lo, hi) = histogram.range();
        let curve = normal_curve(cleaned.mu, cleaned.sigma, lo, hi, CURVE_POINTS)?;
        Ok(Self {
            cleaned,
            histogram,
            curve,
        })
    }
}

/// Raw counts with a normal overlay, the sample mean and a confidence band.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalView {
    pub summary: Summary,
    pub interval: ConfidenceInterval,
    pub histogram: Histogram,
    pub curve: Vec<(f64, f64)>,
    /// Displayed x range.
    pub x_bounds: (f64, f64),
}

impl NormalView {
    pub fn build(table: &ObservationTable, settings: &Settings) -> Result<Self, StatsError> {
        let values = metric_values(table, &settings.columns.metric)?;
        let summary = Summary::from_values(&values).ok_or_else(|| StatsError::EmptySample {
            group: settings.columns.metric.clone(),
        })?;
        let interval = ConfidenceInterval::for_mean(&values, settings.distribution.confidence_level)?;
        let histogram = Histogram::density(&values, settings.distribution.bins, None)?;

        let x_max = settings
            .distribution
            .x_max
            .unwrap_or(summary.max)
            .max(f64::MIN_POSITIVE);
        let x_bounds = (0.0_f64.min(summary.min), x_max);
        let curve = normal_curve(summary.mean, interval.std_dev, x_bounds.0, x_bounds.1, CURVE_POINTS)?;

        Ok(Self {
            summary,
            interval,
            histogram,
            curve,
            x_bounds,
        })
    }

    /// Confidence band clipped to the displayed range.
    pub fn visible_interval(&self) -> (f64, f64) {
        self.interval.clamped(self.x_bounds.0, self.x_bounds.1)
    }
}

/// A finished two-sample comparison with its report and box statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct TestView {
    pub result: ComparisonResult,
    pub lines: Vec<String>,
    pub box1: BoxStats,
    pub box2: BoxStats,
}

impl TestView {
    pub fn build(
        table: &ObservationTable,
        settings: &Settings,
        group1: &str,
        group2: &str,
        alternative: Alternative,
        alpha: f64,
    ) -> Result<Self, StatsError> {
        let columns = &settings.columns;
        let request = ComparisonRequest::new(&columns.metric, &columns.group, group1, group2)
            .alternative(alternative)
            .alpha(alpha)
            .variance(settings.hypothesis.variance);
        let result = compare(table, &request)?;
        let lines = report(&result, &settings.verdict_format())?;

        let box_for = |label: &str| -> Result<BoxStats, StatsError> {
            let sample = table.group_sample(&columns.metric, &columns.group, label)?;
            BoxStats::from_values(sample.values()).ok_or_else(|| StatsError::EmptySample {
                group: label.to_string(),
            })
        };
        let box1 = box_for(group1)?;
        let box2 = box_for(group2)?;

        Ok(Self {
            result,
            lines,
            box1,
            box2,
        })
    }

    /// Chart caption: `t=…, p=…, significant=…`.
    pub fn caption(&self) -> String {
        format!(
            "t={:.2}, p={:.4}, significant={}",
            self.result.t_statistic, self.result.p_value, self.result.significant
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ObservationTable {
        let mut pairs: Vec<(&str, Option<f64>)> = Vec::new();
        pairs.extend([10.0, 12.0, 11.0, 13.0].iter().map(|&v| ("AA", Some(v))));
        pairs.extend([20.0, 19.0, 21.0, 22.0].iter().map(|&v| ("BB", Some(v))));
        pairs.push(("EU27_2020", Some(1000.0)));
        ObservationTable::from_pairs("geo", "OBS_VALUE", &pairs)
    }

    #[test]
    fn top_countries_skip_regions() {
        let top = top_countries(&table(), &Settings::default(), TOP_COUNTRIES).unwrap();
        let keys: Vec<&str> = top.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["BB", "AA"]);
    }

    #[test]
    fn test_view_reports_and_boxes() {
        let view = TestView::build(&table(), &Settings::default(), "AA", "BB", Alternative::TwoSided, 0.05)
            .unwrap();
        assert!(view.result.significant);
        assert_eq!(view.lines.len(), 5);
        assert_eq!(view.box1.median, 11.5);
        assert_eq!(view.box2.median, 20.5);
        assert!(view.caption().ends_with("significant=true"));
    }

    #[test]
    fn normal_view_uses_configured_x_range() {
        let mut settings = Settings::default();
        settings.distribution.x_max = Some(50.0);
        let view = NormalView::build(&table(), &settings).unwrap();
        assert_eq!(view.x_bounds, (0.0, 50.0));
        let (lo, hi) = view.visible_interval();
        assert!(lo >= 0.0 && hi <= 50.0);
    }

    #[test]
    fn cleaned_view_curve_spans_histogram() {
        let view = CleanedView::build(&table(), &Settings::default()).unwrap();
        let (lo, hi) = view.histogram.range();
        assert_eq!(view.curve.first().map(|p| p.0), Some(lo));
        assert!((view.curve.last().map(|p| p.0).unwrap() - hi).abs() < 1e-9);
    }
}
