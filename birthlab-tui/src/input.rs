//! Keyboard input dispatch: global keys first, then the current screen's handler.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use birthlab_core::stats::Alternative;

use crate::app::{App, MenuItem, Screen, TableItem};

/// Handle a key event.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    if app.screen.is_view() {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q')
        ) {
            app.back_to_menu();
        }
        return;
    }

    match app.screen {
        Screen::Menu { .. } => handle_menu_key(app, key),
        Screen::TableMenu { .. } => handle_table_key(app, key),
        Screen::CountryPicker(_) => handle_picker_key(app, key),
        Screen::DirectionPicker { .. } => handle_direction_key(app, key),
        Screen::AlphaInput { .. } => handle_alpha_key(app, key),
        _ => {}
    }
}

/// Move a list cursor by one, wrapping at both ends.
fn step(cursor: &mut usize, len: usize, code: KeyCode) {
    if len == 0 {
        return;
    }
    match code {
        KeyCode::Up | KeyCode::Char('k') => *cursor = (*cursor + len - 1) % len,
        KeyCode::Down | KeyCode::Char('j') => *cursor = (*cursor + 1) % len,
        KeyCode::Home => *cursor = 0,
        KeyCode::End => *cursor = len - 1,
        _ => {}
    }
}

/// `'1'..` shortcut → zero-based index below `len`.
fn digit_index(code: KeyCode, len: usize) -> Option<usize> {
    match code {
        KeyCode::Char(c) => c
            .to_digit(10)
            .and_then(|d| (d as usize).checked_sub(1))
            .filter(|&i| i < len),
        _ => None,
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    let Screen::Menu { cursor } = &mut app.screen else {
        return;
    };
    let items = MenuItem::ALL;
    match key.code {
        KeyCode::Enter => {
            let item = items[*cursor];
            app.select_menu(item);
        }
        KeyCode::Esc | KeyCode::Char('q') => app.quit(),
        code => {
            if let Some(i) = digit_index(code, items.len()) {
                app.select_menu(items[i]);
            } else {
                step(cursor, items.len(), code);
            }
        }
    }
}

fn handle_table_key(app: &mut App, key: KeyEvent) {
    let Screen::TableMenu { cursor } = &mut app.screen else {
        return;
    };
    let items = TableItem::ALL;
    match key.code {
        KeyCode::Enter => {
            let item = items[*cursor];
            app.select_table(item);
        }
        KeyCode::Esc | KeyCode::Char('q') => app.back_to_menu(),
        code => {
            if let Some(i) = digit_index(code, items.len()) {
                app.select_table(items[i]);
            } else {
                step(cursor, items.len(), code);
            }
        }
    }
}

fn handle_picker_key(app: &mut App, key: KeyEvent) {
    let len = app.countries.len();
    let Screen::CountryPicker(picker) = &mut app.screen else {
        return;
    };
    match key.code {
        KeyCode::Char(' ') => {
            if let Some(code) = app.countries.get(picker.cursor) {
                picker.toggle(code);
            }
        }
        KeyCode::Enter => app.confirm_countries(),
        KeyCode::Esc | KeyCode::Char('q') => app.back_to_menu(),
        code => step(&mut picker.cursor, len, code),
    }
}

fn handle_direction_key(app: &mut App, key: KeyEvent) {
    let Screen::DirectionPicker { cursor, .. } = &mut app.screen else {
        return;
    };
    let choices = Alternative::ALL;
    match key.code {
        KeyCode::Enter => {
            let label = choices[*cursor].label();
            app.choose_direction(label);
        }
        KeyCode::Esc | KeyCode::Char('q') => app.back_to_menu(),
        code => {
            if let Some(i) = digit_index(code, choices.len()) {
                app.choose_direction(choices[i].label());
            } else {
                step(cursor, choices.len(), code);
            }
        }
    }
}

fn handle_alpha_key(app: &mut App, key: KeyEvent) {
    let Screen::AlphaInput { buffer, .. } = &mut app.screen else {
        return;
    };
    match key.code {
        KeyCode::Enter => app.submit_alpha(),
        KeyCode::Esc => app.back_to_menu(),
        KeyCode::Backspace => {
            buffer.pop();
        }
        KeyCode::Char(c) if !c.is_control() => buffer.push(c),
        _ => {}
    }
}
