//! Transcript scrollbar.
//!
//! The thumb length is computed once from the viewport/content ratio and then
//! positioned along the track, so it keeps a constant size while scrolling and
//! lands exactly on the last cell when pinned to the bottom.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

const THUMB: &str = "█";
const TRACK: &str = "│";

/// Vertical scrollbar drawn on the right edge of its area.
#[derive(Debug, Clone, Copy)]
pub struct Scrollbar {
    total_rows: usize,
    viewport_rows: usize,
    /// Rows hidden above the viewport.
    offset: usize,
}

impl Scrollbar {
    pub fn new(total_rows: usize, viewport_rows: usize, offset: usize) -> Self {
        Self {
            total_rows,
            viewport_rows,
            offset,
        }
    }

    /// Returns `(start, len)` of the thumb on a track of `track` cells, or
    /// `None` when everything fits and no bar is drawn.
    fn thumb(&self, track: usize) -> Option<(usize, usize)> {
        let max_offset = self.total_rows.saturating_sub(self.viewport_rows);
        if track == 0 || max_offset == 0 {
            return None;
        }
        let len = (track * self.viewport_rows)
            .div_ceil(self.total_rows)
            .clamp(1, track);
        let free = track - len;
        let start = self.offset.min(max_offset) * free / max_offset;
        Some((start, len))
    }
}

impl Widget for Scrollbar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let track = area.height as usize;
        let Some((start, len)) = self.thumb(track) else {
            return;
        };
        let x = area.x + area.width.saturating_sub(1);
        let style = Style::default().fg(Color::DarkGray);
        for (idx, y) in (area.y..area.y + area.height).enumerate() {
            let symbol = if (start..start + len).contains(&idx) {
                THUMB
            } else {
                TRACK
            };
            buf.set_string(x, y, symbol, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_when_content_fits() {
        assert_eq!(Scrollbar::new(10, 20, 0).thumb(20), None);
        assert_eq!(Scrollbar::new(20, 20, 0).thumb(20), None);
    }

    #[test]
    fn test_thumb_at_top_and_bottom() {
        let top = Scrollbar::new(100, 20, 0).thumb(20).unwrap();
        assert_eq!(top, (0, 4));

        let bottom = Scrollbar::new(100, 20, 80).thumb(20).unwrap();
        assert_eq!(bottom.0 + bottom.1, 20);
    }

    #[test]
    fn test_thumb_size_is_stable() {
        let lens: Vec<usize> = (0..=80)
            .map(|offset| Scrollbar::new(100, 20, offset).thumb(20).unwrap().1)
            .collect();
        assert!(lens.iter().all(|len| *len == lens[0]));
    }
}
