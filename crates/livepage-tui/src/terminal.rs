//! Terminal lifecycle management.
//!
//! Terminal state is restored on normal exit (via `Drop`), on a forced exit
//! after a second Ctrl+C (via the interrupt restore hook), and on panic.

use std::io::{self, Stdout};
use std::ops::{Deref, DerefMut};
use std::panic;

use anyhow::{Context, Result};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Owns the terminal while the TUI runs; restores it when dropped.
pub struct TerminalGuard {
    terminal: Tui,
}

impl TerminalGuard {
    /// Enables raw mode, enters the alternate screen, and captures the mouse.
    ///
    /// Call `install_panic_hook()` first so a panic also restores the terminal.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be switched into TUI mode.
    pub fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
            let _ = restore_terminal();
            return Err(err).context("Failed to enter alternate screen");
        }
        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(err) => {
                let _ = restore_terminal();
                return Err(err).context("Failed to create terminal");
            }
        };
        Ok(Self { terminal })
    }
}

impl Deref for TerminalGuard {
    type Target = Tui;

    fn deref(&self) -> &Tui {
        &self.terminal
    }
}

impl DerefMut for TerminalGuard {
    fn deref_mut(&mut self) -> &mut Tui {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = restore_terminal() {
            tracing::warn!(error = %format!("{err:#}"), "failed to restore terminal");
        }
        let _ = self.terminal.show_cursor();
    }
}

/// Restores terminal state.
///
/// Idempotent: safe to call from the panic hook, the interrupt hook and `Drop`.
///
/// # Errors
/// Returns an error if leaving the alternate screen or raw mode fails.
pub fn restore_terminal() -> Result<()> {
    // Mouse capture must be released while still in raw mode.
    let _ = execute!(io::stdout(), DisableMouseCapture);
    execute!(io::stdout(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}
