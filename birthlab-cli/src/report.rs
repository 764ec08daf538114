//! Plain-text renderings used when charts go to a pipe or `--charts text`.

use std::fmt::Write;

use birthlab_core::stats::{BoxStats, Histogram};
use birthlab_tui::panels::format_count;
use birthlab_tui::views::{CleanedView, NormalView, TestView};

/// Widest text bar.
const BAR_WIDTH: usize = 40;

/// Two-column table with a proportional bar per row.
pub fn totals_table(key_header: &str, totals: &[(String, f64)]) -> String {
    let key_width = totals
        .iter()
        .map(|(k, _)| k.len())
        .chain(std::iter::once(key_header.len()))
        .max()
        .unwrap_or(0);
    let max = totals.iter().map(|(_, v)| *v).fold(0.0, f64::max);

    let mut out = String::new();
    let _ = writeln!(out, "{key_header:<key_width$}  {:>12}", "Births");
    for (key, value) in totals {
        let _ = writeln!(out, "{key:<key_width$}  {value:>12.0}  {}", bar(*value, max));
    }
    out
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(len.max(1))
}

/// One line per bin: `[lo, hi)  count  ####`.
pub fn histogram_text(histogram: &Histogram) -> String {
    let max = histogram.counts.iter().copied().max().unwrap_or(0) as f64;
    let last = histogram.counts.len().saturating_sub(1);
    let mut out = String::new();
    for (i, (edges, &count)) in histogram
        .edges
        .windows(2)
        .zip(&histogram.counts)
        .enumerate()
    {
        let close = if i == last { ']' } else { ')' };
        let _ = writeln!(
            out,
            "[{:>10}, {:>10}{close} {count:>6}  {}",
            format_edge(edges[0]),
            format_edge(edges[1]),
            bar(count as f64, max)
        );
    }
    out
}

fn format_edge(v: f64) -> String {
    if v.abs() >= 1_000.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.3}")
    }
}

/// Summary and confidence interval of the raw counts.
pub fn normal_summary(view: &NormalView) -> String {
    let ci = &view.interval;
    let mut out = String::new();
    let _ = writeln!(out, "Sample Mean: {:.2}", ci.mean);
    let _ = writeln!(out, "Sample Standard Deviation: {:.2}", ci.std_dev);
    let _ = writeln!(out, "Sample Size: {}", ci.n);
    let _ = writeln!(
        out,
        "{:.0}% Confidence Interval for the Mean: ({:.2}, {:.2})",
        ci.level * 100.0,
        ci.lower,
        ci.upper
    );
    out
}

/// Fit of the trimmed, log-transformed counts.
pub fn cleaned_summary(view: &CleanedView) -> String {
    let c = &view.cleaned;
    let mut out = String::new();
    let _ = writeln!(out, "Outliers removed: {}", c.removed);
    let _ = writeln!(out, "Values kept: {}", c.values.len());
    let _ = writeln!(out, "Mean (after cleaning and log transform): {:.4}", c.mu);
    let _ = writeln!(out, "Standard deviation (log scale): {:.4}", c.sigma);
    out
}

/// Report lines followed by the five-number summary of each group.
pub fn comparison_text(view: &TestView) -> String {
    let mut out = String::new();
    for line in &view.lines {
        let _ = writeln!(out, "{line}");
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<6} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "group", "whisker lo", "Q1", "median", "Q3", "whisker hi"
    );
    for (label, stats) in [
        (view.result.group1.as_str(), &view.box1),
        (view.result.group2.as_str(), &view.box2),
    ] {
        out.push_str(&box_row(label, stats));
    }
    out
}

fn box_row(label: &str, s: &BoxStats) -> String {
    let mut row = format!(
        "{label:<6} {:>12.0} {:>12.0} {:>12.0} {:>12.0} {:>12.0}",
        s.lower_whisker, s.q1, s.median, s.q3, s.upper_whisker
    );
    if !s.outliers.is_empty() {
        let _ = write!(row, "  outliers: {}", s.outliers.len());
    }
    row.push('\n');
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_table_scales_bars() {
        let totals = vec![("DE".to_string(), 800.0), ("SE".to_string(), 200.0)];
        let text = totals_table("Country", &totals);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Country"));
        assert!(lines[1].ends_with(&"#".repeat(BAR_WIDTH)));
        assert!(lines[2].ends_with(&format!(" {}", "#".repeat(BAR_WIDTH / 4))));
    }

    #[test]
    fn histogram_text_closes_last_bin() {
        let hist = Histogram::density(&[0.0, 1.0, 2.0, 3.0, 4.0], 2, None).unwrap();
        let text = histogram_text(&hist);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(')'));
        assert!(lines[1].contains(']'));
    }

    #[test]
    fn zero_values_get_no_bar() {
        assert_eq!(bar(0.0, 10.0), "");
        assert_eq!(bar(0.1, 10.0), "#");
    }
}
