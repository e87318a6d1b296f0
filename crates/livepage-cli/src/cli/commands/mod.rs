//! CLI command handlers.

pub mod config;
pub mod replay;
pub mod watch;
