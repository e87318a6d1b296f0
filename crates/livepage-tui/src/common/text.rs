//! Text utilities for transcript rendering.

use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Spaces a tab expands to.
const TAB_WIDTH: usize = 4;

/// Makes streamed text safe to draw: tabs become spaces and other control
/// characters are dropped, so they cannot move the terminal cursor.
///
/// Borrows when the input needs no changes.
pub fn sanitize_for_display(s: &str) -> Cow<'_, str> {
    if !s.chars().any(char::is_control) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if ch == '\t' {
            out.push_str(&" ".repeat(TAB_WIDTH));
        } else if !ch.is_control() {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

/// Display columns `ch` takes once sanitized, or `None` if it is dropped.
fn display_width(ch: char) -> Option<usize> {
    if ch == '\t' {
        Some(TAB_WIDTH)
    } else if ch.is_control() {
        None
    } else {
        Some(ch.width().unwrap_or(0))
    }
}

/// Greedy row breaking for one logical line, fed a character at a time.
///
/// A row breaks before the character that would overflow `width`; a tab
/// moves as one unit. Feeding a line through `push` gives the same rows as
/// `wrap_line`, so callers can count rows as text streams in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowBreaker {
    full_rows: usize,
    col: usize,
    row_open: bool,
}

impl RowBreaker {
    /// Feeds one character. Returns `true` when it starts a new row.
    pub fn push(&mut self, ch: char, width: usize) -> bool {
        let Some(w) = display_width(ch) else {
            return false;
        };
        let wraps = self.row_open && self.col + w > width.max(1);
        if wraps {
            self.full_rows += 1;
            self.col = 0;
        }
        self.col += w;
        self.row_open = true;
        wraps
    }

    /// Rows taken so far. An empty line is one row.
    pub fn rows(&self) -> usize {
        (self.full_rows + usize::from(self.row_open)).max(1)
    }
}

/// Hard-wraps one logical line into rows of at most `width` display columns.
///
/// Always returns at least one row; an empty line is one empty row.
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let mut rows = vec![String::new()];
    let mut breaker = RowBreaker::default();
    for ch in line.chars() {
        if display_width(ch).is_none() {
            continue;
        }
        if breaker.push(ch, width) {
            rows.push(String::new());
        }
        if let Some(row) = rows.last_mut() {
            if ch == '\t' {
                row.push_str(&" ".repeat(TAB_WIDTH));
            } else {
                row.push(ch);
            }
        }
    }
    rows
}

/// Truncates a string with ellipsis if it exceeds `max_width` columns.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        truncated.push(ch);
        used += w;
    }
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_borrows_clean_text() {
        assert!(matches!(sanitize_for_display("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_sanitize_expands_tabs_and_drops_controls() {
        assert_eq!(sanitize_for_display("\tx\r\u{1b}[31m"), "    x[31m");
    }

    #[test]
    fn test_wrap_short_line() {
        assert_eq!(wrap_line("abc", 10), vec!["abc"]);
        assert_eq!(wrap_line("", 10), vec![""]);
    }

    #[test]
    fn test_wrap_long_line() {
        assert_eq!(wrap_line("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn test_wrap_keeps_tabs_whole() {
        assert_eq!(wrap_line("a\tb", 5), vec!["a    ", "b"]);
        assert_eq!(wrap_line("\t", 2), vec!["    "]);
    }

    #[test]
    fn test_row_breaker_matches_wrap_line() {
        for (line, width) in [
            ("", 5),
            ("abcdefgh", 3),
            ("日本語", 4),
            ("a\tb\u{1b}c", 4),
            ("ab", 0),
            ("exactly!", 8),
        ] {
            let mut breaker = RowBreaker::default();
            for ch in line.chars() {
                breaker.push(ch, width);
            }
            assert_eq!(breaker.rows(), wrap_line(line, width).len(), "{line:?} at {width}");
        }
    }

    #[test]
    fn test_wrap_wide_chars() {
        // Each CJK char is two columns wide.
        assert_eq!(wrap_line("日本語", 4), vec!["日本", "語"]);
    }

    #[test]
    fn test_wrap_zero_width_does_not_loop() {
        assert_eq!(wrap_line("ab", 0), vec!["a", "b"]);
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("short", 10), "short");
        assert_eq!(truncate_with_ellipsis("/a/very/long/path", 8), "/a/very…");
        assert_eq!(truncate_with_ellipsis("abc", 1), "…");
    }
}
