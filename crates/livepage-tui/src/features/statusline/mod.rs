//! One-line status bar: mode, session state, key hints.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::common::text::truncate_with_ellipsis;
use crate::state::{AppState, SessionStatus};

const SEPARATOR: &str = " · ";

/// Key hints for the current mode.
pub fn hints(app: &AppState) -> &'static str {
    if app.display.is_live() {
        "c clear · ↑↓ scroll · q quit"
    } else if app.preview_handle().is_some() {
        "o open · q quit"
    } else {
        "q quit"
    }
}

pub fn render_status_line(app: &AppState, frame: &mut Frame, area: Rect) {
    let mode_style = if app.display.is_live() {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::Black).bg(Color::Green)
    };
    let session_style = match app.session {
        SessionStatus::Streaming => Style::default().fg(Color::Green),
        SessionStatus::Closed => Style::default().fg(Color::DarkGray),
        SessionStatus::Failed(_) => Style::default().fg(Color::Red),
    };
    let dim = Style::default().fg(Color::DarkGray);

    let mode = format!(" {} ", app.display.mode().label());
    let mut spans = vec![
        Span::styled(mode, mode_style.add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(app.session.label(), session_style),
    ];

    let detail = match &app.session {
        SessionStatus::Failed(err) => Some(err.clone()),
        _ if !app.view.is_following() && app.display.is_live() => Some("scrolled".to_string()),
        _ => None,
    };
    let message = app.notice.clone().or(detail);

    let fixed: usize = spans.iter().map(Span::width).sum();
    let hints = hints(app);
    let budget = (area.width as usize)
        .saturating_sub(fixed + SEPARATOR.width() * 3 + hints.width());
    let source = truncate_with_ellipsis(&app.source, budget / 2);
    let remaining = budget.saturating_sub(source.width());
    spans.push(Span::styled(SEPARATOR, dim));
    spans.push(Span::raw(source));
    if let Some(message) = message {
        spans.push(Span::styled(SEPARATOR, dim));
        spans.push(Span::styled(
            truncate_with_ellipsis(&message, remaining),
            Style::default().fg(Color::Yellow),
        ));
    }
    spans.push(Span::styled(SEPARATOR, dim));
    spans.push(Span::styled(hints, dim));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
