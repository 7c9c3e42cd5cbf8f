//! Toast overlay for transient notifications

use crate::app::App;
use crate::state::{Toast, ToastKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 5;

/// Draw the current toast, if one is showing, above the status bar
pub fn draw(frame: &mut Frame, app: &App) {
    let Some(toast) = app.state.toasts.current() else {
        return;
    };

    let area = frame.area();
    let width = TOAST_WIDTH.min(area.width);
    let toast_area = Rect {
        x: area.width.saturating_sub(width + 1),
        y: area.height.saturating_sub(TOAST_HEIGHT + 1),
        width,
        height: TOAST_HEIGHT.min(area.height),
    };

    let color = toast_color(toast);

    let content = vec![
        Line::from(toast.message.clone()),
        Line::from(Span::styled(
            "Esc:dismiss",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .title(Span::styled(
                    format!(" {} ", toast.title),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, toast_area);
    frame.render_widget(paragraph, toast_area);
}

fn toast_color(toast: &Toast) -> Color {
    match toast.kind {
        ToastKind::Info => Color::Cyan,
        ToastKind::Success => Color::Green,
        ToastKind::Error => Color::Red,
    }
}
