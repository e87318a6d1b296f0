use livepage_core::preview::SANDBOX_POLICY;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::PreviewStatus;

/// Draws the summary of a rendered application.
pub fn render_summary(status: &PreviewStatus, document: &str, frame: &mut Frame, area: Rect) {
    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Size     ", label),
            Span::raw(format!("{} bytes", document.len())),
        ]),
        Line::from(vec![
            Span::styled("Sandbox  ", label),
            Span::raw(format!("{SANDBOX_POLICY} (opaque origin)")),
        ]),
    ];

    match status {
        PreviewStatus::Idle | PreviewStatus::Pending => {
            lines.push(Line::from(vec![
                Span::styled("Preview  ", label),
                Span::raw("writing…"),
            ]));
        }
        PreviewStatus::Ready(handle) => {
            lines.push(Line::from(vec![
                Span::styled("Preview  ", label),
                Span::raw(handle.path.display().to_string()),
            ]));
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                "Press o to open it again in the browser.",
                label,
            )));
        }
        PreviewStatus::Failed(err) => {
            lines.push(Line::from(vec![
                Span::styled("Preview  ", label),
                Span::styled(format!("failed: {err}"), Style::default().fg(Color::Red)),
            ]));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(Span::styled(
            " Application rendered ",
            Style::default().add_modifier(Modifier::BOLD),
        ));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
