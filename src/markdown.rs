use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Render markdown answer text into styled lines. Handles code fences,
/// headings, and list bullets per line; everything else goes through the
/// inline parser.
pub fn render_markdown(text: &str) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut in_code_block = false;

    for raw in text.lines() {
        let trimmed = raw.trim_start();

        if trimmed.starts_with("```") {
            // The fence line itself is not rendered
            in_code_block = !in_code_block;
            continue;
        }

        if in_code_block {
            lines.push(Line::from(Span::styled(
                raw.to_string(),
                Style::default().fg(Color::Green),
            )));
            continue;
        }

        if trimmed.starts_with('#') {
            let heading = trimmed.trim_start_matches('#').trim_start();
            lines.push(Line::from(Span::styled(
                heading.to_string(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )));
            continue;
        }

        if let Some(item) = trimmed.strip_prefix("- ").or_else(|| trimmed.strip_prefix("* ")) {
            let mut spans = vec![Span::raw("  • ")];
            spans.extend(parse_inline(item).spans);
            lines.push(Line::from(spans));
            continue;
        }

        lines.push(parse_inline(raw));
    }

    lines
}

/// Parse one line of text and convert **bold**, *italic*, `code`, and
/// [label](url) markdown to styled spans. Unterminated markers are kept as
/// literal text.
pub fn parse_inline(text: &str) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut chars = text.chars().peekable();
    let mut current_text = String::new();

    while let Some(c) = chars.next() {
        match c {
            '*' => {
                if chars.peek() == Some(&'*') {
                    // Consume the second *
                    chars.next();

                    if !current_text.is_empty() {
                        spans.push(Span::raw(std::mem::take(&mut current_text)));
                    }

                    // Find closing **
                    let mut bold_text = String::new();
                    let mut found_close = false;

                    while let Some(c) = chars.next() {
                        if c == '*' && chars.peek() == Some(&'*') {
                            chars.next(); // consume second *
                            found_close = true;
                            break;
                        }
                        bold_text.push(c);
                    }

                    if found_close && !bold_text.is_empty() {
                        spans.push(Span::styled(
                            bold_text,
                            Style::default().add_modifier(Modifier::BOLD),
                        ));
                    } else {
                        // No closing **, treat as literal
                        current_text.push_str("**");
                        current_text.push_str(&bold_text);
                    }
                } else {
                    if !current_text.is_empty() {
                        spans.push(Span::raw(std::mem::take(&mut current_text)));
                    }

                    // Find closing *
                    let mut italic_text = String::new();
                    let mut found_close = false;

                    for c in chars.by_ref() {
                        if c == '*' {
                            found_close = true;
                            break;
                        }
                        italic_text.push(c);
                    }

                    if found_close && !italic_text.is_empty() {
                        spans.push(Span::styled(
                            italic_text,
                            Style::default().add_modifier(Modifier::ITALIC),
                        ));
                    } else {
                        current_text.push('*');
                        current_text.push_str(&italic_text);
                    }
                }
            }
            '`' => {
                if !current_text.is_empty() {
                    spans.push(Span::raw(std::mem::take(&mut current_text)));
                }

                let mut code_text = String::new();
                let mut found_close = false;

                for c in chars.by_ref() {
                    if c == '`' {
                        found_close = true;
                        break;
                    }
                    code_text.push(c);
                }

                if found_close && !code_text.is_empty() {
                    spans.push(Span::styled(
                        code_text,
                        Style::default().fg(Color::Green),
                    ));
                } else {
                    current_text.push('`');
                    current_text.push_str(&code_text);
                }
            }
            '[' => {
                // Try [label](url); anything else stays literal
                let mut label = String::new();
                let mut found_label = false;

                for c in chars.by_ref() {
                    if c == ']' {
                        found_label = true;
                        break;
                    }
                    label.push(c);
                }

                let mut url = String::new();
                let mut found_url = false;

                if found_label && chars.peek() == Some(&'(') {
                    chars.next(); // consume (
                    for c in chars.by_ref() {
                        if c == ')' {
                            found_url = true;
                            break;
                        }
                        url.push(c);
                    }
                }

                if found_url && !label.is_empty() {
                    if !current_text.is_empty() {
                        spans.push(Span::raw(std::mem::take(&mut current_text)));
                    }
                    spans.push(Span::styled(
                        label,
                        Style::default()
                            .fg(Color::Blue)
                            .add_modifier(Modifier::UNDERLINED),
                    ));
                    if !url.is_empty() {
                        spans.push(Span::styled(
                            format!(" ({})", url),
                            Style::default().fg(Color::DarkGray),
                        ));
                    }
                } else {
                    current_text.push('[');
                    current_text.push_str(&label);
                    if found_label {
                        current_text.push(']');
                        if !url.is_empty() || found_url {
                            current_text.push('(');
                            current_text.push_str(&url);
                            if found_url {
                                current_text.push(')');
                            }
                        }
                    }
                }
            }
            _ => current_text.push(c),
        }
    }

    if !current_text.is_empty() {
        spans.push(Span::raw(current_text));
    }

    if spans.is_empty() {
        Line::default()
    } else {
        Line::from(spans)
    }
}
