//! Full-screen TUI for watching a livepage session.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};
use std::sync::Arc;

use anyhow::Result;
use livepage_core::preview::IsolatedSurface;
use livepage_core::session::MessageStream;
pub use runtime::TuiRuntime;

/// Runs the interactive view over `stream` until the user quits.
///
/// # Errors
/// Returns an error if stdout is not a terminal, if the terminal cannot be
/// driven, or `InterruptedError` when stopped by a signal.
pub async fn run_interactive(
    source: String,
    stream: MessageStream,
    surface: Arc<dyn IsolatedSurface>,
) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "Watch mode requires a terminal.\n\
             Use `livepage replay <PATH>` for non-interactive use."
        );
    }

    tracing::info!(%source, "starting interactive view");
    let mut runtime = TuiRuntime::new(source, stream, surface)?;
    runtime.run()
}
