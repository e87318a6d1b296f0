//! Server-Sent Events message source.
//!
//! Each SSE event's `data` field carries one JSON payload. Events whose data
//! is blank or not JSON are skipped. A transport error ends the stream; there
//! is no reconnect.

use anyhow::{Context, Result};
use eventsource_stream::Eventsource;
use futures_util::StreamExt;
use serde_json::Value;
use url::Url;

use super::{MessageStream, unwrap_envelope};

/// Builds the events URL, appending `user_id` as a query parameter when set.
///
/// # Errors
/// Returns an error if `base` is not a valid absolute URL.
pub fn events_url(base: &str, user_id: Option<&str>) -> Result<Url> {
    let mut url = Url::parse(base).with_context(|| format!("Invalid session URL '{base}'"))?;
    if let Some(user_id) = user_id.map(str::trim).filter(|id| !id.is_empty()) {
        url.query_pairs_mut().append_pair("user_id", user_id);
    }
    Ok(url)
}

/// Parses one SSE event payload. Returns `None` when there is nothing to deliver.
pub fn parse_event_data(event: &str, data: &str) -> Option<Value> {
    let data = data.trim();
    if data.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(data) {
        Ok(value) => Some(unwrap_envelope(value)),
        Err(err) => {
            tracing::warn!(event, error = %err, "skipping malformed SSE event");
            None
        }
    }
}

/// Connects to an SSE endpoint and streams its payloads.
///
/// # Errors
/// Returns an error if the request fails or the server answers with a
/// non-success status.
pub async fn connect(client: &reqwest::Client, url: Url) -> Result<MessageStream> {
    tracing::info!(%url, "connecting to session");
    let response = client
        .get(url.clone())
        .header(reqwest::header::ACCEPT, "text/event-stream")
        .send()
        .await
        .with_context(|| format!("Failed to connect to {url}"))?
        .error_for_status()
        .with_context(|| format!("Session endpoint {url} rejected the request"))?;

    let stream = response
        .bytes_stream()
        .eventsource()
        .filter_map(|item| async move {
            match item {
                Ok(event) => parse_event_data(&event.event, &event.data).map(Ok),
                Err(err) => Some(Err(anyhow::anyhow!("SSE stream error: {err}"))),
            }
        });
    Ok(Box::pin(stream))
}
