//! Transcript view state: scroll position and wrapped row bookkeeping.
//!
//! The transcript only grows between clears, so `RowCache` folds each
//! appended chunk into a list of wrapped row offsets and never looks at
//! earlier text again. Appending to a very long line costs the same as
//! appending to a short one.

use std::ops::Range;

use livepage_core::core::transcript::Transcript;

use crate::common::text::RowBreaker;

/// Scroll position of the live transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scroll {
    /// Pinned to the bottom; the newest text is always visible.
    #[default]
    Follow,
    /// Scrolled up by this many rows from the bottom.
    Manual { from_bottom: usize },
}

/// Wrapped rows of the transcript, maintained incrementally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowCache {
    width: usize,
    generation: u64,
    /// Transcript bytes already folded in.
    scanned: usize,
    /// Byte offset where each wrapped row starts. Empty until the first sync.
    row_starts: Vec<usize>,
    /// Break state of the last line.
    tail: RowBreaker,
}

impl RowCache {
    /// Brings the cache in line with `transcript` at `width`.
    pub fn sync(&mut self, transcript: &Transcript, width: usize) {
        let reusable = !self.row_starts.is_empty()
            && width == self.width
            && transcript.generation() == self.generation
            && transcript.len() >= self.scanned;
        if !reusable {
            *self = Self {
                width,
                generation: transcript.generation(),
                scanned: 0,
                row_starts: vec![0],
                tail: RowBreaker::default(),
            };
        }

        let text = transcript.as_str();
        for (idx, ch) in text[self.scanned..].char_indices() {
            let at = self.scanned + idx;
            if ch == '\n' {
                self.row_starts.push(at + 1);
                self.tail = RowBreaker::default();
            } else if self.tail.push(ch, width) {
                self.row_starts.push(at);
            }
        }
        self.scanned = text.len();
    }

    pub fn total_rows(&self) -> usize {
        self.row_starts.len()
    }

    /// Whether the cache reflects all of `transcript` wrapped at `width`.
    pub fn is_current(&self, transcript: &Transcript, width: usize) -> bool {
        !self.row_starts.is_empty()
            && self.width == width
            && self.generation == transcript.generation()
            && self.scanned == transcript.len()
    }

    /// Byte range of wrapped row `index` in `transcript`, without the newline
    /// that ends its line.
    pub fn row_range(&self, transcript: &Transcript, index: usize) -> Option<Range<usize>> {
        let start = *self.row_starts.get(index)?;
        let end = match self.row_starts.get(index + 1) {
            Some(&next) if transcript.as_str()[..next].ends_with('\n') => next - 1,
            Some(&next) => next,
            None => transcript.len(),
        };
        Some(start..end)
    }
}

/// View state for the live transcript surface.
#[derive(Debug, Clone, Default)]
pub struct TranscriptView {
    pub scroll: Scroll,
    pub rows: RowCache,
    /// Viewport size from the last frame.
    pub viewport_width: usize,
    pub viewport_height: usize,
}

impl TranscriptView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the view to the bottom.
    pub fn follow(&mut self) {
        self.scroll = Scroll::Follow;
    }

    pub fn is_following(&self) -> bool {
        self.scroll == Scroll::Follow
    }

    /// Records the viewport size and refreshes row totals.
    pub fn set_viewport(&mut self, transcript: &Transcript, width: usize, height: usize) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.rows.sync(transcript, width);
        self.clamp();
    }

    /// Called after every transcript mutation: re-counts rows and pins to the bottom.
    pub fn on_transcript_changed(&mut self, transcript: &Transcript) {
        self.rows.sync(transcript, self.viewport_width);
        self.follow();
    }

    fn max_from_bottom(&self) -> usize {
        self.rows.total_rows().saturating_sub(self.viewport_height)
    }

    /// Rows hidden below the viewport.
    pub fn from_bottom(&self) -> usize {
        match self.scroll {
            Scroll::Follow => 0,
            Scroll::Manual { from_bottom } => from_bottom.min(self.max_from_bottom()),
        }
    }

    /// Rows hidden above the viewport.
    pub fn offset_from_top(&self) -> usize {
        self.max_from_bottom() - self.from_bottom()
    }

    pub fn scroll_up(&mut self, rows: usize) {
        let target = (self.from_bottom() + rows).min(self.max_from_bottom());
        if target > 0 {
            self.scroll = Scroll::Manual {
                from_bottom: target,
            };
        }
    }

    pub fn scroll_down(&mut self, rows: usize) {
        let target = self.from_bottom().saturating_sub(rows);
        self.scroll = if target == 0 {
            Scroll::Follow
        } else {
            Scroll::Manual {
                from_bottom: target,
            }
        };
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_up(usize::MAX / 2);
    }

    pub fn page_rows(&self) -> usize {
        self.viewport_height.saturating_sub(1).max(1)
    }

    fn clamp(&mut self) {
        if let Scroll::Manual { from_bottom } = self.scroll {
            let clamped = from_bottom.min(self.max_from_bottom());
            self.scroll = if clamped == 0 {
                Scroll::Follow
            } else {
                Scroll::Manual {
                    from_bottom: clamped,
                }
            };
        }
    }
}
