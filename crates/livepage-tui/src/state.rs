//! TUI application state.
//!
//! `AppState` is mutated only by the reducer in `update.rs` and read by the
//! pure render functions in `render.rs`.

use livepage_core::core::display::DisplayState;
use livepage_core::preview::PreviewHandle;

use crate::features::preview::PreviewStatus;
use crate::features::transcript::TranscriptView;

/// Lifecycle of the message stream feeding this view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionStatus {
    /// Subscribed and receiving messages.
    #[default]
    Streaming,
    /// The stream ended normally.
    Closed,
    /// The stream ended with a transport error.
    Failed(String),
}

impl SessionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Streaming => "connected",
            Self::Closed => "closed",
            Self::Failed(_) => "error",
        }
    }
}

/// Full TUI state.
#[derive(Debug, Default)]
pub struct AppState {
    pub should_quit: bool,
    /// Display state machine fed by the session.
    pub display: DisplayState,
    /// Scroll and wrap bookkeeping for the live transcript.
    pub view: TranscriptView,
    /// Human-readable name of the message source (URL or file).
    pub source: String,
    pub session: SessionStatus,
    pub preview: PreviewStatus,
    /// Sequence of the latest isolated render; results for older ones are stale.
    pub render_seq: u64,
    /// One-shot message shown in the status bar until the next key press.
    pub notice: Option<String>,
    /// Set whenever something visible changed since the last draw.
    pub dirty: bool,
}

impl AppState {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            dirty: true,
            ..Self::default()
        }
    }

    /// Handle of the preview currently shown, if it finished rendering.
    pub fn preview_handle(&self) -> Option<&PreviewHandle> {
        match &self.preview {
            PreviewStatus::Ready(handle) => Some(handle),
            _ => None,
        }
    }
}
