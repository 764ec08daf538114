//! Density histogram with a fitted normal curve, optional mean marker and
//! shaded confidence band.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Widget},
};

use birthlab_core::stats::Histogram;

use super::format_count;
use crate::theme::Theme;

/// Bar samples drawn per histogram bin so bins render as filled columns.
const SAMPLES_PER_BIN: usize = 8;
/// Bar samples across the confidence band.
const BAND_SAMPLES: usize = 60;

pub struct HistogramChart<'a> {
    histogram: &'a Histogram,
    curve: &'a [(f64, f64)],
    title: &'a str,
    x_label: &'a str,
    mean: Option<f64>,
    band: Option<(f64, f64, String)>,
    x_bounds: Option<(f64, f64)>,
    theme: &'a Theme,
}

impl<'a> HistogramChart<'a> {
    pub fn new(
        histogram: &'a Histogram,
        curve: &'a [(f64, f64)],
        title: &'a str,
        x_label: &'a str,
        theme: &'a Theme,
    ) -> Self {
        Self {
            histogram,
            curve,
            title,
            x_label,
            mean: None,
            band: None,
            x_bounds: None,
            theme,
        }
    }

    pub fn mean(mut self, mean: f64) -> Self {
        self.mean = Some(mean);
        self
    }

    /// Shade `[lo, hi]`, listed in the legend as `label`.
    pub fn band(mut self, lo: f64, hi: f64, label: impl Into<String>) -> Self {
        self.band = Some((lo, hi, label.into()));
        self
    }

    pub fn x_bounds(mut self, lo: f64, hi: f64) -> Self {
        self.x_bounds = Some((lo, hi));
        self
    }

    fn y_max(&self) -> f64 {
        let curve_max = self.curve.iter().map(|p| p.1).fold(0.0, f64::max);
        let top = self.histogram.max_density().max(curve_max);
        if top > 0.0 {
            top * 1.1
        } else {
            1.0
        }
    }

    fn bar_points(&self) -> Vec<(f64, f64)> {
        let width = self.histogram.bin_width();
        self.histogram
            .edges
            .iter()
            .zip(&self.histogram.densities)
            .filter(|(_, d)| **d > 0.0)
            .flat_map(|(&left, &density)| {
                (0..SAMPLES_PER_BIN).map(move |i| {
                    let x = left + width * (i as f64 + 0.5) / SAMPLES_PER_BIN as f64;
                    (x, density)
                })
            })
            .collect()
    }
}

impl Widget for HistogramChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (x_min, x_max) = self.x_bounds.unwrap_or_else(|| self.histogram.range());
        let y_max = self.y_max();
        let muted = self.theme.muted_style();

        let band_points: Vec<(f64, f64)> = match &self.band {
            Some((lo, hi, _)) if hi > lo => (0..BAND_SAMPLES)
                .map(|i| (lo + (hi - lo) * i as f64 / (BAND_SAMPLES - 1) as f64, y_max))
                .collect(),
            _ => Vec::new(),
        };
        let bars = self.bar_points();
        let mean_line: Vec<(f64, f64)> = self.mean.map(|m| vec![(m, 0.0), (m, y_max)]).unwrap_or_default();

        let mut datasets = Vec::new();
        if let Some((_, _, label)) = &self.band {
            datasets.push(
                Dataset::default()
                    .name(label.clone())
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Bar)
                    .style(Style::default().fg(self.theme.muted))
                    .data(&band_points),
            );
        }
        datasets.push(
            Dataset::default()
                .name("Density")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Bar)
                .style(Style::default().fg(self.theme.positive))
                .data(&bars),
        );
        datasets.push(
            Dataset::default()
                .name("Normal Distribution")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(self.theme.negative))
                .data(self.curve),
        );
        if let Some(m) = self.mean {
            datasets.push(
                Dataset::default()
                    .name(format!("Mean: {m:.0}"))
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(self.theme.warning))
                    .data(&mean_line),
            );
        }

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(self.theme.title())
            .borders(Borders::ALL)
            .border_style(self.theme.border());

        let x_label = |v: f64| {
            if v.abs() >= 1_000.0 {
                format_count(v)
            } else {
                format!("{v:.2}")
            }
        };

        Chart::new(datasets)
            .block(block)
            .legend_position(Some(LegendPosition::TopRight))
            .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)))
            .x_axis(
                Axis::default()
                    .title(Span::styled(self.x_label, muted))
                    .style(muted)
                    .bounds([x_min, x_max])
                    .labels(vec![
                        Span::styled(x_label(x_min), muted),
                        Span::styled(x_label((x_min + x_max) / 2.0), muted),
                        Span::styled(x_label(x_max), muted),
                    ]),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled("Density", muted))
                    .style(muted)
                    .bounds([0.0, y_max])
                    .labels(vec![
                        Span::styled("0", muted),
                        Span::styled(format!("{y_max:.2e}"), muted),
                    ]),
            )
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::buffer_text;

    fn histogram() -> Histogram {
        let values: Vec<f64> = (0..200).map(|i| ((i % 20) as f64) + 10.0).collect();
        Histogram::density(&values, 10, None).unwrap()
    }

    #[test]
    fn bars_cover_each_non_empty_bin() {
        let theme = Theme::default();
        let hist = histogram();
        let chart = HistogramChart::new(&hist, &[], "h", "x", &theme);
        let non_empty = hist.densities.iter().filter(|&&d| d > 0.0).count();
        assert_eq!(chart.bar_points().len(), non_empty * SAMPLES_PER_BIN);
    }

    #[test]
    fn y_axis_leaves_headroom() {
        let theme = Theme::default();
        let hist = histogram();
        let curve = vec![(10.0, 1.0)];
        let chart = HistogramChart::new(&hist, &curve, "h", "x", &theme);
        assert!((chart.y_max() - 1.1).abs() < 1e-12);
    }

    #[test]
    fn renders_legend_entries() {
        let theme = Theme::default();
        let hist = histogram();
        let curve = vec![(10.0, 0.01), (20.0, 0.05), (29.0, 0.01)];
        let area = Rect::new(0, 0, 100, 24);
        let mut buf = Buffer::empty(area);
        HistogramChart::new(&hist, &curve, "Counts", "Number of Births", &theme)
            .mean(19.6)
            .band(18.0, 21.0, "95% CI")
            .render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Counts"));
        assert!(text.contains("Mean: 20"));
        assert!(text.contains("95% CI"));
    }
}
