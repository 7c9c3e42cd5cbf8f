//! Field rendering for console forms

use crate::state::FieldState;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw a form field from the domain layer's editing state
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FieldState, is_active: bool) {
    let has_error = field.error().is_some();

    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let border_style = if has_error {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let raw = field.raw();
    let display_str = if field.is_select() {
        if is_active {
            format!("◂ {raw} ▸")
        } else {
            raw
        }
    } else if raw.is_empty() && !is_active {
        "(empty)".to_string()
    } else {
        raw
    };

    // Selects have no text cursor
    let cursor = if is_active && !field.is_select() {
        "▌"
    } else {
        ""
    };

    let content = if field.def.is_multiline() {
        let mut lines: Vec<Line> = display_str
            .lines()
            .map(|l| Line::from(l.to_string()))
            .collect();
        if !cursor.is_empty() {
            if let Some(last) = lines.last_mut() {
                last.spans
                    .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
            } else {
                lines.push(Line::from(Span::styled(
                    cursor,
                    Style::default().fg(Color::Cyan),
                )));
            }
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_str, style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]))
    };

    let mut block = Block::default()
        .title(format!(" {} ", field.def.display_label()))
        .borders(Borders::ALL)
        .border_style(border_style);

    // Validation message sits in the bottom border
    if let Some(message) = field.error() {
        block = block.title_bottom(
            Line::from(Span::styled(
                format!(" {message} "),
                Style::default().fg(Color::Red),
            ))
            .left_aligned(),
        );
    }

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}
