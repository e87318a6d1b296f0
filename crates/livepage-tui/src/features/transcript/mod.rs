//! Live transcript surface.

mod render;
mod state;

pub use render::{SCROLLBAR_WIDTH, TRANSCRIPT_MARGIN, render_transcript, tail_rows, text_width};
pub use state::{RowCache, Scroll, TranscriptView};
