//! Session bridge.
//!
//! Subscribes to a stream of raw server payloads and forwards each one,
//! untouched and in delivery order, to the view's inbox. Decoding happens
//! on the receiving side; this module only moves bytes-turned-JSON.
//!
//! ```text
//! source (jsonl | sse) ──> Subscription task ──> SessionEvent::Message ──> view
//!                                            └─> SessionEvent::Closed (once)
//! ```
//!
//! Dropping the `Subscription` cancels the forwarding task, so no event is
//! delivered into a view that has been torn down.

pub mod jsonl;
pub mod sse;

use std::pin::Pin;

use futures_util::{Stream, StreamExt};
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A transport-framed stream of raw server payloads.
///
/// An `Err` item ends the session.
pub type MessageStream = Pin<Box<dyn Stream<Item = anyhow::Result<Value>> + Send>>;

/// Events delivered from a live session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// One raw server payload.
    Message(Value),
    /// The session ended. `error` is set when it ended because of a fault.
    Closed { error: Option<String> },
}

/// Envelope `type` used by the real-time client for server messages.
pub const SERVER_MESSAGE_TYPE: &str = "server-message";

/// Unwraps a `{"type": "server-message", "data": {...}}` envelope.
///
/// Any other value is returned unchanged.
pub fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut fields)
            if fields.get("type").and_then(Value::as_str) == Some(SERVER_MESSAGE_TYPE)
                && fields.contains_key("data") =>
        {
            fields.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// A live subscription to a message stream.
#[derive(Debug)]
pub struct Subscription {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Starts forwarding `stream` into `tx`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(stream: MessageStream, tx: mpsc::UnboundedSender<SessionEvent>) -> Self {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(forward(stream, tx, cancel.clone()));
        Self {
            cancel,
            task: Some(task),
        }
    }

    /// Returns true once the forwarding task has stopped.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Stops forwarding. No further events are sent after this returns.
    pub fn unsubscribe(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

async fn forward(
    mut stream: MessageStream,
    tx: mpsc::UnboundedSender<SessionEvent>,
    cancel: CancellationToken,
) {
    tracing::info!("session subscribed");
    let mut delivered = 0usize;
    let error = loop {
        let next = tokio::select! {
            () = cancel.cancelled() => {
                tracing::info!(delivered, "session unsubscribed");
                return;
            }
            next = stream.next() => next,
        };
        match next {
            Some(Ok(value)) => {
                if tx.send(SessionEvent::Message(value)).is_err() {
                    tracing::debug!("session receiver dropped");
                    return;
                }
                delivered += 1;
            }
            Some(Err(err)) => {
                tracing::warn!(error = %format!("{err:#}"), "session stream failed");
                break Some(format!("{err:#}"));
            }
            None => break None,
        }
    };
    tracing::info!(delivered, "session closed");
    let _ = tx.send(SessionEvent::Closed { error });
}
