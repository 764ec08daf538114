//! Selection screens: main menu, table menu, country picker, test direction
//! and significance-level input.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use birthlab_core::stats::Alternative;

use super::centered_rect;
use crate::app::{App, CountryPicker, GroupPair, MenuItem, TableItem};
use crate::theme::Theme;

fn framed<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {title} "))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border())
}

/// Numbered single-choice list with the cursor row highlighted.
fn render_choices(f: &mut Frame, area: Rect, app: &App, labels: &[&str], cursor: usize) {
    let theme = &app.theme;
    let items: Vec<ListItem> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| ListItem::new(format!("{}. {label}", i + 1)))
        .collect();
    let list = List::new(items)
        .block(framed(app.screen.title(), theme))
        .style(Style::default().fg(theme.text_primary))
        .highlight_style(theme.cursor())
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(cursor));
    f.render_stateful_widget(list, centered_rect(60, 60, area), &mut state);
}

pub fn render_main(f: &mut Frame, area: Rect, app: &App, cursor: usize) {
    let labels: Vec<&str> = MenuItem::ALL.iter().map(|m| m.label()).collect();
    render_choices(f, area, app, &labels, cursor);
}

pub fn render_tables(f: &mut Frame, area: Rect, app: &App, cursor: usize) {
    let labels: Vec<&str> = TableItem::ALL.iter().map(|t| t.label()).collect();
    render_choices(f, area, app, &labels, cursor);
}

pub fn render_direction(f: &mut Frame, area: Rect, app: &App, groups: &GroupPair, cursor: usize) {
    let labels: Vec<&str> = Alternative::ALL.iter().map(|a| a.label()).collect();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(3)])
        .split(area);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!(" H1: mean({}) ? mean({})", groups.group1, groups.group2),
            app.theme.muted_style(),
        ))),
        chunks[0],
    );
    render_choices(f, chunks[1], app, &labels, cursor);
}

pub fn render_picker(f: &mut Frame, area: Rect, app: &App, picker: &CountryPicker) {
    let theme = &app.theme;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(3)])
        .split(area);

    let selected = if picker.selected.is_empty() {
        "none".to_string()
    } else {
        picker.selected.join(", ")
    };
    f.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(picker.prompt(), theme.muted_style())),
            Line::from(vec![
                Span::styled("Selected: ", theme.muted_style()),
                Span::styled(selected, Style::default().fg(theme.positive)),
            ]),
        ]),
        chunks[0],
    );

    let items: Vec<ListItem> = app
        .countries
        .iter()
        .map(|code| {
            let checked = picker.is_selected(code);
            let mark = if checked { "[x]" } else { "[ ]" };
            let style = if checked {
                Style::default()
                    .fg(theme.positive)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text_primary)
            };
            ListItem::new(Line::from(Span::styled(format!("{mark} {code}"), style)))
        })
        .collect();
    let list = List::new(items)
        .block(framed(app.screen.title(), theme))
        .highlight_style(theme.cursor())
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(picker.cursor));
    f.render_stateful_widget(list, chunks[1], &mut state);
}

pub fn render_alpha(
    f: &mut Frame,
    area: Rect,
    app: &App,
    groups: &GroupPair,
    alternative: Alternative,
    buffer: &str,
) {
    let theme = &app.theme;
    let lines = vec![
        Line::from(Span::styled(
            format!(
                "{} vs {} · {}",
                groups.group1,
                groups.group2,
                alternative.label()
            ),
            theme.muted_style(),
        )),
        Line::from(""),
        Line::from(Span::raw("Enter significance level (e.g., 0.05 for 5%):")),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(theme.accent)),
            Span::styled(
                buffer,
                Style::default()
                    .fg(theme.text_primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("_", Style::default().fg(theme.accent)),
        ]),
    ];
    f.render_widget(
        Paragraph::new(lines).block(framed(app.screen.title(), theme)),
        centered_rect(60, 40, area),
    );
}
