//! Isolated preview surface for generated applications.
//!
//! Generated HTML is untrusted model output. It is never loaded into a
//! context that shares an origin with anything else: each document is placed
//! in the `srcdoc` of an `<iframe sandbox="allow-scripts">` inside a static
//! host page. Without `allow-same-origin` the frame runs with an opaque
//! origin, so its scripts execute but cannot reach cookies, storage, or the
//! host window. The host page itself carries no script.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};

/// Sandbox tokens granted to the generated document.
pub const SANDBOX_POLICY: &str = "allow-scripts";

/// A document loaded into an isolated surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewHandle {
    /// Host page containing the sandboxed frame.
    pub path: PathBuf,
    /// Size of the generated document in bytes.
    pub document_len: usize,
}

/// Renders arbitrary HTML in a surface with script execution allowed and
/// access to the embedding context denied.
pub trait IsolatedSurface: Send + Sync {
    /// Loads `html` into a fresh surface.
    ///
    /// # Errors
    /// Returns an error if the surface cannot be created.
    fn render_isolated(&self, html: &str) -> Result<PreviewHandle>;

    /// Brings an already rendered surface back to the user.
    ///
    /// # Errors
    /// Returns an error if the surface cannot be shown.
    fn reopen(&self, handle: &PreviewHandle) -> Result<()>;
}

/// Writes sandboxed host pages to a directory and optionally opens them.
#[derive(Debug)]
pub struct SandboxedPreview {
    dir: PathBuf,
    open_browser: bool,
    seq: AtomicU64,
}

impl SandboxedPreview {
    pub fn new(dir: impl Into<PathBuf>, open_browser: bool) -> Self {
        Self {
            dir: dir.into(),
            open_browser,
            seq: AtomicU64::new(0),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn next_path(&self) -> PathBuf {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        self.dir.join(format!("app-{stamp}-{seq:03}.html"))
    }

    fn open(&self, path: &Path) {
        if !self.open_browser {
            return;
        }
        if let Err(err) = open::that(path) {
            tracing::warn!(path = %path.display(), error = %err, "failed to open preview");
        }
    }
}

impl IsolatedSurface for SandboxedPreview {
    fn render_isolated(&self, html: &str) -> Result<PreviewHandle> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create preview directory {}", self.dir.display()))?;

        let path = self.next_path();
        fs::write(&path, host_page(html))
            .with_context(|| format!("Failed to write preview {}", path.display()))?;
        tracing::info!(path = %path.display(), bytes = html.len(), "rendered application");

        self.open(&path);
        Ok(PreviewHandle {
            path,
            document_len: html.len(),
        })
    }

    fn reopen(&self, handle: &PreviewHandle) -> Result<()> {
        if !handle.path.exists() {
            anyhow::bail!("Preview {} no longer exists", handle.path.display());
        }
        open::that(&handle.path)
            .with_context(|| format!("Failed to open {}", handle.path.display()))
    }
}

/// Builds the static host page that embeds `html` in a sandboxed frame.
pub fn host_page(html: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="referrer" content="no-referrer">
<title>Generated Code Preview</title>
<style>
html, body {{ margin: 0; height: 100%; background: #000; }}
iframe {{ border: 0; width: 100%; height: 100%; display: block; background: #fff; }}
</style>
</head>
<body>
<iframe title="Generated Code Preview" sandbox="{SANDBOX_POLICY}" referrerpolicy="no-referrer" srcdoc="{}"></iframe>
</body>
</html>
"#,
        escape_attribute(html)
    )
}

/// Escapes text for use inside a double-quoted HTML attribute.
pub fn escape_attribute(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + s.len() / 8);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
