use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::app::{App, InputMode, Visibility};
use crate::tui::AppEvent;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.tick_animation(),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl-C quits from anywhere
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.visibility {
        Visibility::Closed => handle_closed_key(app, key),
        Visibility::Minimized => handle_minimized_key(app, key),
        Visibility::Open => match app.input_mode {
            InputMode::Normal => handle_open_normal(app, key),
            InputMode::Editing => handle_open_editing(app, key),
        },
    }
}

fn handle_closed_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Enter | KeyCode::Char('o') => app.open_widget(),
        _ => {}
    }
}

fn handle_minimized_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Enter | KeyCode::Char('o') => app.restore_widget(),
        _ => {}
    }
}

fn handle_open_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            if app.minimizable {
                app.close_widget();
            } else {
                app.should_quit = true;
            }
        }
        KeyCode::Char('m') => app.minimize_widget(),
        KeyCode::Char('i') | KeyCode::Char('/') => app.input_mode = InputMode::Editing,
        KeyCode::Char('j') | KeyCode::Down => app.scroll_chat_down(),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_chat_up(),
        KeyCode::Char('G') => app.scroll_chat_to_bottom(),
        _ => {}
    }
}

fn handle_open_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            // Exit input mode, keep the draft
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => app.submit_query(),
        KeyCode::Backspace => {
            if app.query_cursor > 0 {
                app.query_cursor -= 1;
                let byte_pos = char_to_byte_index(&app.query_input, app.query_cursor);
                app.query_input.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let char_count = app.query_input.chars().count();
            if app.query_cursor < char_count {
                let byte_pos = char_to_byte_index(&app.query_input, app.query_cursor);
                app.query_input.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            app.query_cursor = app.query_cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = app.query_input.chars().count();
            app.query_cursor = (app.query_cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            app.query_cursor = 0;
        }
        KeyCode::End => {
            app.query_cursor = app.query_input.chars().count();
        }
        KeyCode::Char(c) => {
            let byte_pos = char_to_byte_index(&app.query_input, app.query_cursor);
            app.query_input.insert(byte_pos, c);
            app.query_cursor += 1;
        }
        _ => {}
    }
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let x = mouse.column;
    let y = mouse.row;

    let in_widget = app.widget_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);
    let in_chat = app.chat_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);
    let in_input = app.input_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => match app.visibility {
            Visibility::Closed => {
                if in_widget {
                    app.open_widget();
                }
            }
            Visibility::Minimized => {
                // Click anywhere on the minimized bar restores the widget
                if in_widget {
                    app.restore_widget();
                }
            }
            Visibility::Open => {
                if in_input {
                    app.input_mode = InputMode::Editing;
                } else if in_chat {
                    app.input_mode = InputMode::Normal;
                }
            }
        },
        MouseEventKind::ScrollDown => {
            if in_chat {
                app.query_scroll = app.query_scroll.saturating_add(3);
            }
        }
        MouseEventKind::ScrollUp => {
            if in_chat {
                app.query_scroll = app.query_scroll.saturating_sub(3);
            }
        }
        _ => {}
    }
}
