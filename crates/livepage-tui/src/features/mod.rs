//! Feature slices for the TUI.

pub mod preview;
pub mod statusline;
pub mod transcript;
