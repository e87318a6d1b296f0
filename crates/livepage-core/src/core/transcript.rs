//! Append-only transcript buffer.
//!
//! Line boundaries are tracked as text is appended, so a token append only
//! scans the token itself and the view can address the tail of the
//! transcript without re-splitting everything that came before.

/// Live transcript text with incrementally maintained line offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    text: String,
    /// Byte offset of the first character of every line. Always starts with 0.
    line_starts: Vec<usize>,
    /// Bumped on every clear.
    generation: u64,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            line_starts: vec![0],
            generation: 0,
        }
    }

    /// Appends a chunk of text.
    pub fn push_str(&mut self, chunk: &str) {
        let base = self.text.len();
        self.text.push_str(chunk);
        self.line_starts.extend(
            chunk
                .match_indices('\n')
                .map(|(idx, _)| base + idx + 1),
        );
    }

    /// Removes all text.
    pub fn clear(&mut self) {
        self.text.clear();
        self.line_starts.clear();
        self.line_starts.push(0);
        self.generation += 1;
    }

    /// Changes whenever previously appended text is discarded.
    ///
    /// Within one generation the transcript only ever grows, so views may
    /// cache anything derived from terminated lines.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Number of logical lines. An empty transcript has one empty line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Returns the logical line at `index`, without its trailing newline.
    pub fn line(&self, index: usize) -> Option<&str> {
        let start = *self.line_starts.get(index)?;
        let end = self
            .line_starts
            .get(index + 1)
            .map_or(self.text.len(), |next| next - 1);
        Some(&self.text[start..end])
    }

    /// Iterates over logical lines, first to last.
    pub fn lines(&self) -> impl DoubleEndedIterator<Item = &str> + '_ {
        (0..self.line_count()).filter_map(|idx| self.line(idx))
    }
}

impl std::fmt::Display for Transcript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
