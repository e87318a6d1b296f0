//! Rendered application panel.
//!
//! While an application is rendered the transcript is hidden and this panel
//! describes where the sandboxed preview lives.

mod render;

use livepage_core::preview::PreviewHandle;
pub use render::render_summary;

/// Progress of the isolated surface for the current rendered document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PreviewStatus {
    /// No application has been rendered since the last return to live.
    #[default]
    Idle,
    /// The host page is being written.
    Pending,
    Ready(PreviewHandle),
    Failed(String),
}
