//! Boundary-only code fence normalization.
//!
//! Generated applications are usually wrapped in a fenced `html` code block.
//! Only the wrapping is removed: a leading `` ```html `` marker and a trailing
//! `` ``` `` marker, each at most once. Fences inside the document are left
//! alone, since the generated page may legitimately contain them.

/// Opening marker of an `html` code fence.
pub const HTML_FENCE_OPEN: &str = "```html";

/// Closing marker of any code fence.
pub const FENCE_CLOSE: &str = "```";

/// Strips the outer code fence markers from a generated document.
///
/// Both ends are tested against the original buffer, so the result does not
/// depend on which end is stripped first.
pub fn normalize(buffer: &str) -> &str {
    let start = if buffer.starts_with(HTML_FENCE_OPEN) {
        HTML_FENCE_OPEN.len()
    } else {
        0
    };
    let end = if buffer.ends_with(FENCE_CLOSE) {
        buffer.len() - FENCE_CLOSE.len()
    } else {
        buffer.len()
    };
    if start > end {
        return "";
    }
    &buffer[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_both_markers() {
        assert_eq!(normalize("```html\n<p>x</p>\n```"), "\n<p>x</p>\n");
    }

    #[test]
    fn test_leading_marker_only() {
        assert_eq!(normalize("```html\n<p>x</p>\n"), "\n<p>x</p>\n");
    }

    #[test]
    fn test_trailing_marker_only() {
        assert_eq!(normalize("<p>x</p>\n```"), "<p>x</p>\n");
    }

    #[test]
    fn test_unfenced_document_untouched() {
        let doc = "<html><b>hi</b></html>";
        assert_eq!(normalize(doc), doc);
    }

    #[test]
    fn test_interior_fences_untouched() {
        let doc = "```html\n<pre>```js\nlet a = 1;\n```</pre>\n```";
        assert_eq!(normalize(doc), "\n<pre>```js\nlet a = 1;\n```</pre>\n");
    }

    #[test]
    fn test_strips_at_most_once_per_end() {
        assert_eq!(normalize("```html```html<p/>``````"), "```html<p/>```");
    }

    #[test]
    fn test_other_language_fence_not_stripped_at_start() {
        assert_eq!(normalize("```js\nx\n```"), "```js\nx\n");
    }

    #[test]
    fn test_marker_only_buffers() {
        assert_eq!(normalize("```html"), "");
        assert_eq!(normalize("```html```"), "");
        assert_eq!(normalize("```"), "");
        assert_eq!(normalize(""), "");
    }
}
