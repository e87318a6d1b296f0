//! Watch command handler: interactive view over a live session.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use livepage_core::config::{self, Config};
use livepage_core::preview::IsolatedSurface;
use livepage_core::session::{MessageStream, jsonl, sse};
use reqwest::Url;

/// A resolved message source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Sse(Url),
    File(PathBuf),
    Stdin,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Sse(url) => write!(f, "{url}"),
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Stdin => f.write_str("stdin"),
        }
    }
}

/// Picks the message source: `--file` or `--url` flags first, then the
/// configured session URL.
///
/// # Errors
/// Returns an error if no source is configured or the URL is invalid.
pub fn resolve_source(url: Option<&str>, file: Option<&str>, config: &Config) -> Result<Source> {
    match (url, file) {
        (Some(_), Some(_)) => anyhow::bail!("--url and --file cannot be used together"),
        (None, Some("-")) => Ok(Source::Stdin),
        (None, Some(path)) => Ok(Source::File(PathBuf::from(path))),
        (Some(url), None) => sse_source(url, config),
        (None, None) => match config.session_url() {
            Some(url) => sse_source(url, config),
            None => anyhow::bail!(
                "No session source.\n\
                 Pass --url or --file, or set [session] url in {}",
                config::paths::config_path().display()
            ),
        },
    }
}

fn sse_source(url: &str, config: &Config) -> Result<Source> {
    let url = sse::events_url(url, config.session.user_id.as_deref())?;
    Ok(Source::Sse(url))
}

async fn open(source: &Source) -> Result<MessageStream> {
    match source {
        Source::Sse(url) => {
            let client = reqwest::Client::new();
            sse::connect(&client, url.clone()).await
        }
        Source::File(path) => jsonl::from_file(path).await,
        Source::Stdin => Ok(jsonl::from_stdin()),
    }
}

pub async fn run(source: Source, surface: Arc<dyn IsolatedSurface>) -> Result<()> {
    let stream = open(&source)
        .await
        .with_context(|| format!("connect to {source}"))?;
    livepage_tui::run_interactive(source.to_string(), stream, surface).await
}
