//! Live transcript rendering.
//!
//! Visible rows are sliced straight out of the transcript using the row
//! offsets in `RowCache`, so a frame costs the same however long the
//! transcript or its last line grows.

use livepage_core::core::transcript::Transcript;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use super::state::{RowCache, TranscriptView};
use crate::common::Scrollbar;
use crate::common::text::{sanitize_for_display, wrap_line};

/// Horizontal padding on each side of the transcript.
pub const TRANSCRIPT_MARGIN: u16 = 1;

/// Column reserved for the scrollbar.
pub const SCROLLBAR_WIDTH: u16 = 1;

/// Width available for transcript text in a pane of `pane_width` columns.
pub fn text_width(pane_width: u16) -> usize {
    pane_width.saturating_sub(TRANSCRIPT_MARGIN * 2 + SCROLLBAR_WIDTH) as usize
}

/// Wrapped rows ending `skip_from_bottom` rows above the bottom, at most `take`
/// of them, in top-to-bottom order.
pub fn tail_rows(
    transcript: &Transcript,
    rows: &RowCache,
    width: usize,
    skip_from_bottom: usize,
    take: usize,
) -> Vec<String> {
    if !rows.is_current(transcript, width) {
        return wrap_from_end(transcript, width, skip_from_bottom, take);
    }
    let end = rows.total_rows().saturating_sub(skip_from_bottom);
    let start = end.saturating_sub(take);
    (start..end)
        .filter_map(|idx| rows.row_range(transcript, idx))
        .map(|range| sanitize_for_display(&transcript.as_str()[range]).into_owned())
        .collect()
}

/// Uncached path: wraps whole lines walking back from the end.
fn wrap_from_end(
    transcript: &Transcript,
    width: usize,
    skip_from_bottom: usize,
    take: usize,
) -> Vec<String> {
    let mut rows = Vec::with_capacity(take);
    let mut skip = skip_from_bottom;
    'lines: for line in transcript.lines().rev() {
        for row in wrap_line(line, width).into_iter().rev() {
            if skip > 0 {
                skip -= 1;
                continue;
            }
            if rows.len() == take {
                break 'lines;
            }
            rows.push(row);
        }
    }
    rows.reverse();
    rows
}

/// Draws the live transcript, bottom-aligned, with a scrollbar.
pub fn render_transcript(
    view: &TranscriptView,
    transcript: &Transcript,
    frame: &mut Frame,
    area: Rect,
) {
    let height = area.height as usize;
    let width = text_width(area.width);

    let rows = tail_rows(transcript, &view.rows, width, view.from_bottom(), height);
    let padding = height.saturating_sub(rows.len());
    let lines: Vec<Line<'static>> = std::iter::repeat_n(Line::default(), padding)
        .chain(rows.into_iter().map(Line::from))
        .collect();

    let text_area = Rect {
        x: area.x + TRANSCRIPT_MARGIN,
        width: width as u16,
        ..area
    };
    frame.render_widget(Paragraph::new(lines), text_area);

    frame.render_widget(
        Scrollbar::new(view.rows.total_rows(), height, view.offset_from_top()),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript(text: &str) -> Transcript {
        let mut t = Transcript::new();
        t.push_str(text);
        t
    }

    /// Rows from the cached path, checked against the uncached walk.
    fn rows(t: &Transcript, width: usize, skip: usize, take: usize) -> Vec<String> {
        let mut cache = RowCache::default();
        cache.sync(t, width);
        let cached = tail_rows(t, &cache, width, skip, take);
        assert_eq!(cached, wrap_from_end(t, width, skip, take));
        cached
    }

    #[test]
    fn test_tail_rows_pinned() {
        let t = transcript("one\ntwo\nthree");
        assert_eq!(rows(&t, 80, 0, 2), vec!["two", "three"]);
    }

    #[test]
    fn test_tail_rows_shorter_than_viewport() {
        let t = transcript("only");
        assert_eq!(rows(&t, 80, 0, 5), vec!["only"]);
    }

    #[test]
    fn test_tail_rows_wraps_and_skips() {
        let t = transcript("abcdef\nxy");
        // rows: "abc", "def", "xy"
        assert_eq!(rows(&t, 3, 1, 2), vec!["abc", "def"]);
        assert_eq!(rows(&t, 3, 2, 5), vec!["abc"]);
    }

    #[test]
    fn test_tail_rows_keeps_trailing_empty_line() {
        let t = transcript("a\n");
        assert_eq!(rows(&t, 80, 0, 2), vec!["a", ""]);
    }

    #[test]
    fn test_tail_rows_sanitizes_sliced_rows() {
        let t = transcript("a\tb\u{1b}[0m\n日本語x");
        assert_eq!(rows(&t, 5, 0, 4), vec!["a    ", "b[0m", "日本", "語x"]);
    }

    #[test]
    fn test_tail_rows_of_long_single_line() {
        let mut t = Transcript::new();
        for _ in 0..500 {
            t.push_str("<div>");
        }
        assert_eq!(rows(&t, 10, 0, 2), vec!["<div><div>", "<div><div>"]);
        assert_eq!(rows(&t, 10, 249, 3), vec!["<div><div>"]);
    }

    #[test]
    fn test_stale_cache_falls_back_to_wrapping() {
        let mut t = transcript("one\n");
        let mut cache = RowCache::default();
        cache.sync(&t, 80);
        t.push_str("two");
        assert_eq!(tail_rows(&t, &cache, 80, 0, 2), vec!["one", "two"]);
    }

    #[test]
    fn test_text_width_reserves_margins() {
        assert_eq!(text_width(80), 77);
        assert_eq!(text_width(2), 0);
    }
}
