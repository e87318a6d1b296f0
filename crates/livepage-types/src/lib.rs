//! Shared types for livepage.
//!
//! This crate holds the inbound message contract of the live session: the
//! wire field names and the closed `ServerMessage` union they decode into.

pub mod message;

pub use message::{
    APPLICATION_CODE, APPLICATION_END, APPLICATION_START, APPLICATION_THINKING, CLEAR_PRE_TEXT,
    DISPLAY_PRE_TEXT, ServerMessage,
};
