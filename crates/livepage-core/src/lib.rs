//! Core livepage library (display state machine, session bridge, preview, config).

pub mod config;
pub mod core;
pub mod logging;
pub mod preview;
pub mod session;

pub use livepage_types::ServerMessage;
