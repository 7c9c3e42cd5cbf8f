//! Console page: parameter form on the left, results on the right

use super::field_renderer::draw_field;
use crate::app::App;
use crate::optimizer::Console;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::time::{SystemTime, UNIX_EPOCH};

/// Rows given to a multiline field (borders included)
const MULTILINE_FIELD_HEIGHT: u16 = 6;

/// Rows given to a single-line field (borders included)
const FIELD_HEIGHT: u16 = 3;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Draw the active console
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(console) = app.active_console() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Blurb
            Constraint::Min(0),    // Columns
        ])
        .split(area);

    let blurb = Paragraph::new(Line::from(Span::styled(
        format!(" {}", console.blurb()),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )));
    frame.render_widget(blurb, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(45), // Form
            Constraint::Percentage(55), // Results
        ])
        .split(chunks[1]);

    draw_form(frame, columns[0], console);
    draw_result(frame, columns[1], console, app.state.scroll_offset);
}

/// Draw the parameter form column
fn draw_form(frame: &mut Frame, area: Rect, console: &dyn Console) {
    let block = Block::default()
        .title(" Parameters ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let form = console.form();
    let mut constraints: Vec<Constraint> = form
        .fields()
        .iter()
        .map(|field| {
            if field.def.is_multiline() {
                Constraint::Length(MULTILINE_FIELD_HEIGHT)
            } else {
                Constraint::Length(FIELD_HEIGHT)
            }
        })
        .collect();
    constraints.push(Constraint::Min(0)); // Bottom padding

    let field_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (index, field) in form.fields().iter().enumerate() {
        draw_field(frame, field_areas[index], field, index == form.active_index());
    }
}

/// Draw the result column for the console's current outcome
fn draw_result(frame: &mut Frame, area: Rect, console: &dyn Console, scroll_offset: usize) {
    let (border_color, content) = if console.is_busy() {
        (Color::Yellow, busy_lines())
    } else if let Some(rows) = console.result_rows() {
        let mut lines = Vec::new();
        for row in &rows {
            lines.push(Line::from(Span::styled(
                row.label.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
            for value_line in row.value.lines() {
                lines.push(Line::from(value_line.to_string()));
            }
            lines.push(Line::from(""));
        }
        (Color::Green, lines)
    } else if console.is_failed() {
        (
            Color::Red,
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    "The last optimization attempt failed.",
                    Style::default().fg(Color::Red),
                )),
                Line::from(Span::styled(
                    "Adjust the parameters and try again.",
                    Style::default().fg(Color::DarkGray),
                )),
            ],
        )
    } else {
        (
            Color::DarkGray,
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Results of the optimization will be displayed here.",
                    Style::default().fg(Color::DarkGray),
                )),
            ],
        )
    };

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .title(" Results ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll_offset as u16, 0));

    frame.render_widget(paragraph, area);
}

fn busy_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(spinner_frame(), Style::default().fg(Color::Yellow)),
            Span::styled(" Optimizing…", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(Span::styled(
            "Waiting for the model to reply.",
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

/// Spinner frame derived from wall-clock time, advanced by the redraw loop
fn spinner_frame() -> &'static str {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    SPINNER_FRAMES[(millis / 100) as usize % SPINNER_FRAMES.len()]
}
