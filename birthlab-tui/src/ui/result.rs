//! Hypothesis test result: report lines above the two-group box plot.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::panels::BoxPlot;
use crate::views::TestView;

pub fn render(f: &mut Frame, area: Rect, app: &App, view: &TestView) {
    let theme = &app.theme;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(view.lines.len() as u16 + 3),
            Constraint::Min(6),
        ])
        .split(area);

    let verdict_style = Style::default()
        .fg(theme.verdict_color(view.result.significant))
        .add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line> = Vec::with_capacity(view.lines.len() + 1);
    for (i, text) in view.lines.iter().enumerate() {
        let style = if i == 0 {
            verdict_style
        } else {
            Style::default().fg(theme.text_primary)
        };
        lines.push(Line::from(Span::styled(text.as_str(), style)));
    }
    lines.push(Line::from(Span::styled(view.caption(), theme.muted_style())));

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(format!(" {} ", app.screen.title()))
                    .title_style(theme.title())
                    .borders(Borders::ALL)
                    .border_style(theme.border()),
            ),
        chunks[0],
    );

    let title = format!(
        "Comparison of '{}' Between {} and {}",
        app.settings.columns.metric, view.result.group1, view.result.group2
    );
    f.render_widget(
        BoxPlot::new(
            vec![
                (view.result.group1.as_str(), &view.box1),
                (view.result.group2.as_str(), &view.box2),
            ],
            &title,
            theme,
        ),
        chunks[1],
    );
}
