//! Streaming display state machine.
//!
//! Consumes decoded server messages one at a time and decides whether the
//! view shows the live transcript or a rendered application.
//!
//! ```text
//! message                   transcript        code buffer       mode
//! clear-pre-text            cleared           -                 Live
//! display-pre-text(t)       += t              -                 Live
//! web-application-start     cleared           cleared           Live
//! web-application-thinking  += t              -                 unchanged
//! web-application-code(c)   += c              += c              Live
//! web-application-end       cleared           read once         Rendered
//! ```
//!
//! The user-invoked clear only works while `Live`; a rendered application
//! can only be replaced by the backend.

use livepage_types::ServerMessage;
use serde_json::Value;

use crate::core::fence;
use crate::core::transcript::Transcript;

/// Which surface is active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// The live transcript is shown.
    #[default]
    Live,
    /// A finished application is shown in an isolated surface.
    Rendered {
        /// Normalized HTML of the generated application.
        document: String,
    },
}

impl Mode {
    pub fn is_live(&self) -> bool {
        matches!(self, Mode::Live)
    }

    /// Short label for status display.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Live => "live",
            Mode::Rendered { .. } => "rendered",
        }
    }
}

/// Outcome of applying one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    /// The transcript text changed.
    pub transcript_changed: bool,
    /// The active surface switched between live and rendered.
    pub mode_changed: bool,
    /// A freshly finished document that must be loaded into a new isolated surface.
    pub rendered: Option<String>,
}

/// Display state owned by one view for its whole lifetime.
#[derive(Debug, Clone, Default)]
pub struct DisplayState {
    mode: Mode,
    transcript: Transcript,
    code_buffer: String,
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_live(&self) -> bool {
        self.mode.is_live()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Accumulated code of the application currently being generated.
    pub fn code_buffer(&self) -> &str {
        &self.code_buffer
    }

    /// The rendered document; `None` while the live transcript is active.
    pub fn rendered_document(&self) -> Option<&str> {
        match &self.mode {
            Mode::Live => None,
            Mode::Rendered { document } => Some(document),
        }
    }

    /// Decodes a raw session payload and applies it.
    ///
    /// Returns `None` when the payload carries no recognized field; nothing
    /// was mutated and nothing needs to be redrawn.
    pub fn handle(&mut self, raw: &Value) -> Option<Transition> {
        let message = ServerMessage::decode(raw)?;
        tracing::debug!(kind = message.kind(), "server message");
        Some(self.apply(&message))
    }

    /// Applies one decoded message.
    pub fn apply(&mut self, message: &ServerMessage) -> Transition {
        let was_live = self.mode.is_live();
        let mut transition = Transition::default();

        match message {
            ServerMessage::ClearPreText => {
                self.transcript.clear();
                self.mode = Mode::Live;
                transition.transcript_changed = true;
            }
            ServerMessage::DisplayPreText(text) => {
                self.transcript.push_str(text);
                self.mode = Mode::Live;
                transition.transcript_changed = true;
            }
            ServerMessage::ApplicationStart => {
                self.code_buffer.clear();
                self.transcript.clear();
                self.mode = Mode::Live;
                transition.transcript_changed = true;
            }
            ServerMessage::ApplicationThinking(text) => {
                self.transcript.push_str(text);
                transition.transcript_changed = true;
            }
            ServerMessage::ApplicationCode(chunk) => {
                self.transcript.push_str(chunk);
                self.code_buffer.push_str(chunk);
                self.mode = Mode::Live;
                transition.transcript_changed = true;
            }
            ServerMessage::ApplicationEnd => {
                let document = fence::normalize(&self.code_buffer).to_string();
                self.transcript.clear();
                self.mode = Mode::Rendered {
                    document: document.clone(),
                };
                transition.transcript_changed = true;
                transition.rendered = Some(document);
            }
        }

        transition.mode_changed = was_live != self.mode.is_live();
        transition
    }

    /// User-invoked clear of the live transcript.
    ///
    /// Returns `false` without touching anything while an application is rendered.
    pub fn clear(&mut self) -> bool {
        if !self.mode.is_live() {
            return false;
        }
        self.transcript.clear();
        true
    }
}
