//! Top-level UI layout: the current screen above a one-line status bar.

pub mod menu;
pub mod result;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

use crate::app::{App, Screen};
use crate::panels::{HistogramChart, TotalsBarChart, TrendChart};

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    draw_screen(f, chunks[0], app);
    status_bar::render(f, chunks[1], app);
}

fn draw_screen(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let title = app.screen.title();
    match &app.screen {
        Screen::Menu { cursor } => menu::render_main(f, area, app, *cursor),
        Screen::TableMenu { cursor } => menu::render_tables(f, area, app, *cursor),
        Screen::CountryPicker(picker) => menu::render_picker(f, area, app, picker),
        Screen::DirectionPicker { groups, cursor } => {
            menu::render_direction(f, area, app, groups, *cursor)
        }
        Screen::AlphaInput {
            groups,
            alternative,
            buffer,
        } => menu::render_alpha(f, area, app, groups, *alternative, buffer),
        Screen::Trend(totals) => f.render_widget(TrendChart::new(totals, title, theme), area),
        Screen::CountryBars(totals) | Screen::TopCountries(totals) => {
            f.render_widget(TotalsBarChart::new(totals, title, theme), area)
        }
        Screen::CleanedHistogram(view) => f.render_widget(
            HistogramChart::new(
                &view.histogram,
                &view.curve,
                title,
                "Log(Number of Births)",
                theme,
            ),
            area,
        ),
        Screen::NormalHistogram(view) => {
            let (lo, hi) = view.visible_interval();
            let (x_lo, x_hi) = view.x_bounds;
            f.render_widget(
                HistogramChart::new(&view.histogram, &view.curve, title, "Number of Births", theme)
                    .x_bounds(x_lo, x_hi)
                    .mean(view.summary.mean)
                    .band(lo, hi, format!("{:.0}% CI", view.interval.level * 100.0)),
                area,
            )
        }
        Screen::TestResult(view) => result::render(f, area, app, view),
    }
}

/// Compute a centered rect for dialogs.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
