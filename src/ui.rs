use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::{App, ChatRole, InputMode, Visibility};
use crate::markdown;

const WIDGET_TITLE: &str = "MOSDAC Assistant";

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    if !app.minimizable {
        // Always-open variant fills the terminal
        app.widget_area = Some(area);
        render_chat_window(app, frame, area);
        return;
    }

    match app.visibility {
        Visibility::Closed => render_launcher(app, frame, area),
        Visibility::Minimized => render_minimized_bar(app, frame, area),
        Visibility::Open => {
            let widget = anchored_rect(area, 64, 24);
            app.widget_area = Some(widget);
            frame.render_widget(Clear, widget);
            render_chat_window(app, frame, widget);
        }
    }
}

/// Rect hugging the bottom-right corner, like a floating chat widget.
fn anchored_rect(area: Rect, max_width: u16, max_height: u16) -> Rect {
    let width = area.width.min(max_width);
    let height = area.height.min(max_height);
    Rect {
        x: area.right().saturating_sub(width),
        y: area.bottom().saturating_sub(height),
        width,
        height,
    }
}

fn render_launcher(app: &mut App, frame: &mut Frame, area: Rect) {
    let rect = anchored_rect(area, 24, 3);
    app.widget_area = Some(rect);
    app.chat_area = None;
    app.input_area = None;

    let button = Paragraph::new(Line::from(vec![
        Span::styled("  ", Style::default()),
        Span::styled(
            WIDGET_TITLE,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(Clear, rect);
    frame.render_widget(button, rect);
}

fn render_minimized_bar(app: &mut App, frame: &mut Frame, area: Rect) {
    let rect = anchored_rect(area, 40, 3);
    app.widget_area = Some(rect);
    app.chat_area = None;
    app.input_area = None;

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", WIDGET_TITLE),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled("(Enter to restore)", Style::default().fg(Color::DarkGray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(Clear, rect);
    frame.render_widget(bar, rect);
}

fn render_chat_window(app: &mut App, frame: &mut Frame, area: Rect) {
    let [header_area, chat_area, input_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    app.chat_area = Some(chat_area);
    app.input_area = Some(input_area);

    // Store chat area dimensions for scroll calculations (inner size minus borders)
    app.query_chat_height = chat_area.height.saturating_sub(2);
    app.query_chat_width = chat_area.width.saturating_sub(2);

    let chat_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let chat = Paragraph::new(transcript_text(app))
        .block(chat_block)
        .wrap(Wrap { trim: true })
        .scroll((app.query_scroll, 0));

    frame.render_widget(chat, chat_area);

    render_input(app, frame, input_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let status = if app.query_loading { "Typing..." } else { "Online" };

    let mut spans = vec![
        Span::styled(
            format!(" {} ", WIDGET_TITLE),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(status, Style::default().fg(Color::Green)),
    ];
    if app.minimizable {
        spans.push(Span::styled(
            "  m minimize · q close",
            Style::default().fg(Color::Gray),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

/// Role label for a chat bubble. Pure: sender tag in, styled line out.
fn role_line(role: ChatRole) -> Line<'static> {
    match role {
        ChatRole::User => Line::from(Span::styled(
            "You:",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        ChatRole::Assistant => Line::from(Span::styled(
            "Assistant:",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
    }
}

fn transcript_text(app: &App) -> Text<'static> {
    let mut lines: Vec<Line> = Vec::new();

    for msg in &app.chat_messages {
        lines.push(role_line(msg.role));
        lines.extend(markdown::render_markdown(&msg.content));
        lines.push(Line::default());
    }

    if app.query_loading {
        lines.push(role_line(ChatRole::Assistant));
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            format!("Typing{}", dots),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    Text::from(lines)
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let input_border_color = if app.input_mode == InputMode::Editing {
        Color::Yellow
    } else {
        Color::DarkGray
    };

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(input_border_color))
        .title(" Ask (i to type, Enter to send) ");

    // Calculate visible portion of input with horizontal scrolling
    // Inner width = total width - 2 (for borders)
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = app.query_cursor;

    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let input = if app.query_input.is_empty() && app.input_mode == InputMode::Normal {
        Paragraph::new("Ask me about MOSDAC...")
            .style(Style::default().fg(Color::DarkGray))
            .block(input_block)
    } else {
        let visible_text: String = app
            .query_input
            .chars()
            .skip(scroll_offset)
            .take(inner_width)
            .collect();

        Paragraph::new(visible_text)
            .style(Style::default().fg(Color::Cyan))
            .block(input_block)
    };

    frame.render_widget(input, area);

    // Show cursor when editing
    if app.input_mode == InputMode::Editing {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}
