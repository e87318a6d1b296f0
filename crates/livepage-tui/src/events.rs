//! UI event types.
//!
//! Everything the reducer reacts to arrives as a `UiEvent`: terminal input,
//! session messages, and results of effects the runtime executed.

use crossterm::event::Event;
use livepage_core::preview::PreviewHandle;
use livepage_core::session::SessionEvent;

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic heartbeat from the runtime.
    Tick,
    /// Current terminal size, sent before each batch of events.
    Frame { width: u16, height: u16 },
    Terminal(Event),
    Session(SessionEvent),
    /// An isolated render finished. `seq` matches the effect that started it.
    PreviewRendered {
        seq: u64,
        result: Result<PreviewHandle, String>,
    },
    /// Reopening a preview failed.
    PreviewReopenFailed(String),
}
