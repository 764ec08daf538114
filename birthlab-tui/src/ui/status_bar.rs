//! Bottom status bar: the last message, then key hints for the current screen.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, Screen, StatusLevel};

fn hints(screen: &Screen) -> &'static str {
    match screen {
        Screen::Menu { .. } | Screen::TableMenu { .. } | Screen::DirectionPicker { .. } => {
            " ↑↓/jk move · Enter select · 1-9 shortcut · Esc back"
        }
        Screen::CountryPicker(_) => " ↑↓/jk move · Space toggle · Enter confirm · Esc back",
        Screen::AlphaInput { .. } => " type a value · Enter run test · Esc cancel",
        _ => " Esc/Enter back to menu",
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mut spans: Vec<Span> = Vec::new();

    // Hints are what gets cut on a narrow terminal.
    if let Some((msg, level)) = &app.status_message {
        let color = match level {
            StatusLevel::Info => theme.accent,
            StatusLevel::Warning => theme.warning,
            StatusLevel::Error => theme.negative,
        };
        spans.push(Span::styled(format!(" {msg}"), Style::default().fg(color)));
        spans.push(Span::raw(" |"));
    }
    spans.push(Span::styled(hints(&app.screen), theme.muted_style()));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
