//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects.

use livepage_core::core::display::Mode;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::features::{preview, statusline, transcript};
use crate::state::AppState;

/// Height of the status line at the bottom.
const STATUS_HEIGHT: u16 = 1;

/// Splits the screen into the main pane and the status line.
fn layout(area: Rect) -> (Rect, Rect) {
    let [pane, status] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(STATUS_HEIGHT)]).areas(area);
    (pane, status)
}

/// Area of the transcript pane for a screen of `area`.
pub fn transcript_pane(area: Rect) -> Rect {
    layout(area).0
}

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let (pane, status) = layout(frame.area());

    match app.display.mode() {
        Mode::Live => {
            transcript::render_transcript(&app.view, app.display.transcript(), frame, pane);
        }
        Mode::Rendered { document } => {
            preview::render_summary(&app.preview, document, frame, pane);
        }
    }
    statusline::render_status_line(app, frame, status);
}
