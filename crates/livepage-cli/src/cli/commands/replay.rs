//! Replay command handler: runs recorded messages through the display state
//! machine without a terminal UI.
//!
//! Transcript text is streamed to stdout as it arrives; every finished
//! application is written to a sandboxed preview and announced with a
//! `Rendered: <path>` line.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use futures_util::StreamExt;
use livepage_core::core::display::DisplayState;
use livepage_core::core::interrupt::{self, InterruptedError};
use livepage_core::preview::IsolatedSurface;
use livepage_core::session::{MessageStream, jsonl};

/// Counters reported after a replay.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Payloads delivered by the source.
    pub messages: usize,
    /// Payloads without a recognized field.
    pub ignored: usize,
    /// Preview pages written, in order.
    pub rendered: Vec<PathBuf>,
    /// Previews that could not be written.
    pub failed: usize,
}

impl ReplaySummary {
    fn describe(&self) -> String {
        let mut line = format!(
            "Replayed {} message(s), {} ignored; rendered {} application(s)",
            self.messages,
            self.ignored,
            self.rendered.len()
        );
        if self.failed > 0 {
            line.push_str(&format!(", {} failed", self.failed));
        }
        line
    }
}

pub async fn run(path: &str, surface: &dyn IsolatedSurface) -> Result<()> {
    let stream = if path == "-" {
        jsonl::from_stdin()
    } else {
        jsonl::from_file(Path::new(path)).await?
    };

    let mut out = io::stdout();
    let summary = tokio::select! {
        result = replay(stream, surface, &mut out) => result?,
        () = interrupt::wait_for_interrupt() => return Err(InterruptedError.into()),
    };
    writeln!(out, "{}", summary.describe())?;
    tracing::info!(?summary, "replay finished");
    Ok(())
}

/// Feeds every payload of `stream` through a fresh `DisplayState`.
///
/// # Errors
/// Returns an error if the source fails or `out` cannot be written.
pub async fn replay<W: Write>(
    mut stream: MessageStream,
    surface: &dyn IsolatedSurface,
    out: &mut W,
) -> Result<ReplaySummary> {
    let mut display = DisplayState::new();
    let mut summary = ReplaySummary::default();
    let mut at_line_start = true;
    // Transcript generation and byte length already written to `out`.
    let mut shown = (0, 0);

    while let Some(item) = stream.next().await {
        let raw = item.context("read session messages")?;
        summary.messages += 1;

        let Some(transition) = display.handle(&raw) else {
            summary.ignored += 1;
            continue;
        };

        // Text that arrives while an application is rendered stays hidden
        // until the transcript is active again.
        if display.is_live() {
            let transcript = display.transcript();
            if transcript.generation() != shown.0 {
                shown = (transcript.generation(), 0);
            }
            if transcript.len() > shown.1 {
                let appended = &transcript.as_str()[shown.1..];
                out.write_all(appended.as_bytes())?;
                at_line_start = appended.ends_with('\n');
                shown.1 = transcript.len();
            }
        }

        if let Some(document) = transition.rendered {
            if !at_line_start {
                writeln!(out)?;
                at_line_start = true;
            }
            match surface.render_isolated(&document) {
                Ok(handle) => {
                    writeln!(out, "Rendered: {}", handle.path.display())?;
                    summary.rendered.push(handle.path);
                }
                Err(err) => {
                    tracing::warn!(error = %format!("{err:#}"), "preview render failed");
                    writeln!(out, "Preview failed: {err:#}")?;
                    summary.failed += 1;
                }
            }
        }
        out.flush()?;
    }

    if !at_line_start {
        writeln!(out)?;
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Mutex;

    use anyhow::bail;
    use livepage_core::preview::PreviewHandle;

    use super::*;

    /// Records rendered documents instead of writing files.
    #[derive(Default)]
    struct RecordingSurface {
        documents: Mutex<Vec<String>>,
    }

    impl IsolatedSurface for RecordingSurface {
        fn render_isolated(&self, html: &str) -> Result<PreviewHandle> {
            let mut documents = self.documents.lock().unwrap();
            documents.push(html.to_string());
            Ok(PreviewHandle {
                path: PathBuf::from(format!("app-{}.html", documents.len())),
                document_len: html.len(),
            })
        }

        fn reopen(&self, _handle: &PreviewHandle) -> Result<()> {
            Ok(())
        }
    }

    struct BrokenSurface;

    impl IsolatedSurface for BrokenSurface {
        fn render_isolated(&self, _html: &str) -> Result<PreviewHandle> {
            bail!("disk full")
        }

        fn reopen(&self, _handle: &PreviewHandle) -> Result<()> {
            bail!("disk full")
        }
    }

    fn stream(lines: &str) -> MessageStream {
        jsonl::from_reader(Cursor::new(lines.as_bytes().to_vec()))
    }

    const SESSION: &str = r#"{"display-pre-text":"Generating app...\n"}
{"web-application-start":true}
{"web-application-thinking":"Planning"}
{"web-application-code":"```html<h1>Hi</h1>"}
{"web-application-code":"```"}
{"web-application-end":true}
{"unknown":1}
{"type":"server-message","data":{"display-pre-text":"Done.\n"}}
"#;

    #[tokio::test]
    async fn test_replay_streams_text_and_renders() {
        let surface = RecordingSurface::default();
        let mut out = Vec::new();
        let summary = replay(stream(SESSION), &surface, &mut out).await.unwrap();

        assert_eq!(summary.messages, 8);
        assert_eq!(summary.ignored, 1);
        assert_eq!(summary.rendered, vec![PathBuf::from("app-1.html")]);
        assert_eq!(*surface.documents.lock().unwrap(), vec!["<h1>Hi</h1>"]);

        let out = String::from_utf8(out).unwrap();
        assert_eq!(
            out,
            "Generating app...\nPlanning```html<h1>Hi</h1>```\nRendered: app-1.html\nDone.\n"
        );
    }

    #[tokio::test]
    async fn test_replay_hides_text_that_arrives_while_rendered() {
        let session = r#"{"web-application-start":true}
{"web-application-code":"<p/>"}
{"web-application-end":true}
{"web-application-thinking":"still thinking"}
"#;
        let mut out = Vec::new();
        replay(stream(session), &RecordingSurface::default(), &mut out)
            .await
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(out, "<p/>\nRendered: app-1.html\n");
        assert!(!out.contains("still thinking"));
    }

    #[tokio::test]
    async fn test_replay_shows_transcript_again_once_live() {
        let session = r#"{"web-application-end":true}
{"web-application-thinking":"Hmm. "}
{"display-pre-text":"Back.\n"}
"#;
        let mut out = Vec::new();
        replay(stream(session), &RecordingSurface::default(), &mut out)
            .await
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Rendered: app-1.html\nHmm. Back.\n"
        );
    }

    #[tokio::test]
    async fn test_replay_counts_failed_previews() {
        let mut out = Vec::new();
        let summary = replay(
            stream("{\"web-application-end\":true}\n"),
            &BrokenSurface,
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(summary.failed, 1);
        assert!(summary.rendered.is_empty());
        assert!(String::from_utf8(out).unwrap().contains("Preview failed: disk full"));
        assert!(summary.describe().contains("1 failed"));
    }

    #[tokio::test]
    async fn test_replay_of_empty_stream() {
        let mut out = Vec::new();
        let summary = replay(stream(""), &RecordingSurface::default(), &mut out)
            .await
            .unwrap();
        assert_eq!(summary, ReplaySummary::default());
        assert!(out.is_empty());
    }
}
