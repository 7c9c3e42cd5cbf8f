//! Service panel view: details of the configured model backend

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the service panel
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let service = app.service();

    let mut content = vec![
        Line::from(Span::styled(
            "Generative Language Service",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    let (key_color, key_text) = if service.api_key_configured {
        (Color::Green, "Configured")
    } else {
        (Color::Red, "Missing (set GEMINI_API_KEY)")
    };
    content.push(Line::from(vec![
        Span::styled("API Key: ", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("● {key_text}"), Style::default().fg(key_color)),
    ]));

    content.push(Line::from(vec![
        Span::styled("Model: ", Style::default().fg(Color::DarkGray)),
        Span::raw(service.model.clone()),
    ]));

    content.push(Line::from(vec![
        Span::styled("Endpoint: ", Style::default().fg(Color::DarkGray)),
        Span::raw(service.api_url.clone()),
    ]));

    content.push(Line::from(vec![
        Span::styled("Request Timeout: ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}s", service.request_timeout.as_secs())),
    ]));

    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "─".repeat(40),
        Style::default().fg(Color::DarkGray),
    )));
    content.push(Line::from(""));

    content.push(Line::from(Span::styled(
        "Consoles",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    content.push(Line::from(""));
    for (index, console) in app.consoles().iter().enumerate() {
        let marker = if console.is_busy() {
            Span::styled("● ", Style::default().fg(Color::Yellow))
        } else if console.result_rows().is_some() {
            Span::styled("● ", Style::default().fg(Color::Green))
        } else {
            Span::styled("○ ", Style::default().fg(Color::DarkGray))
        };
        content.push(Line::from(vec![
            Span::styled(
                format!("{:>2}. ", index + 1),
                Style::default().fg(Color::DarkGray),
            ),
            marker,
            Span::raw(console.title()),
        ]));
    }

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .title(" Service ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}
