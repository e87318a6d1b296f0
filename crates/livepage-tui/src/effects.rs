//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer never performs I/O itself.

use livepage_core::preview::PreviewHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Load a finished document into a fresh isolated surface.
    RenderIsolated { seq: u64, html: String },

    /// Show an existing preview again.
    ReopenPreview { handle: PreviewHandle },
}
