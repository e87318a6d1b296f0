//! Newline-delimited JSON message source.
//!
//! Each non-blank line is one server payload. Lines that are not valid JSON
//! are logged and skipped; a read error ends the stream.

use std::path::Path;

use anyhow::Context;
use futures_util::stream;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use super::{MessageStream, unwrap_envelope};

/// Parses one line into a payload. Returns `None` for blank or malformed lines.
pub fn parse_line(line: &str, line_no: usize) -> Option<Value> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => Some(unwrap_envelope(value)),
        Err(err) => {
            tracing::warn!(line = line_no, error = %err, "skipping malformed message line");
            None
        }
    }
}

/// Streams payloads from any buffered async reader.
pub fn from_reader<R>(reader: R) -> MessageStream
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    let lines = reader.lines();
    Box::pin(stream::unfold((lines, 0usize), |(mut lines, mut line_no)| async move {
        loop {
            line_no += 1;
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if let Some(value) = parse_line(&line, line_no) {
                        return Some((Ok(value), (lines, line_no)));
                    }
                }
                Ok(None) => return None,
                Err(err) => {
                    let err = anyhow::Error::new(err).context(format!("read line {line_no}"));
                    return Some((Err(err), (lines, line_no)));
                }
            }
        }
    }))
}

/// Streams payloads from a file.
///
/// # Errors
/// Returns an error if the file cannot be opened.
pub async fn from_file(path: &Path) -> anyhow::Result<MessageStream> {
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open message file {}", path.display()))?;
    Ok(from_reader(BufReader::new(file)))
}

/// Streams payloads from standard input.
pub fn from_stdin() -> MessageStream {
    from_reader(BufReader::new(tokio::io::stdin()))
}
