//! Server message contract.
//!
//! Messages arrive as loosely-shaped JSON objects keyed by field presence.
//! `ServerMessage::decode` classifies one object into exactly one variant,
//! checking fields in a fixed priority order. The first recognized field wins;
//! anything else about the object is ignored.
//!
//! ```text
//! priority  field                       payload
//! 1         clear-pre-text              true
//! 2         display-pre-text            string
//! 3         web-application-start       true
//! 4         web-application-thinking    string
//! 5         web-application-code        string
//! 6         web-application-end         true
//! ```
//!
//! A field carrying the wrong JSON type counts as absent. Decoding never fails:
//! an object with no recognized field, or a non-object value, decodes to `None`.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

pub const CLEAR_PRE_TEXT: &str = "clear-pre-text";
pub const DISPLAY_PRE_TEXT: &str = "display-pre-text";
pub const APPLICATION_START: &str = "web-application-start";
pub const APPLICATION_THINKING: &str = "web-application-thinking";
pub const APPLICATION_CODE: &str = "web-application-code";
pub const APPLICATION_END: &str = "web-application-end";

/// One recognized event from the live session stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// Wipe the live transcript.
    ClearPreText,
    /// Append text to the live transcript.
    DisplayPreText(String),
    /// A new generated application begins; resets code accumulation.
    ApplicationStart,
    /// Model commentary while generating. Shown live, never accumulated.
    ApplicationThinking(String),
    /// A chunk of the generated document.
    ApplicationCode(String),
    /// The generated document is complete.
    ApplicationEnd,
}

impl ServerMessage {
    /// Classifies a raw session payload.
    ///
    /// Returns `None` for payloads that carry none of the recognized fields.
    pub fn decode(value: &Value) -> Option<Self> {
        let fields = value.as_object()?;

        let flag = |key: &str| fields.get(key).and_then(Value::as_bool) == Some(true);
        let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_owned);

        if flag(CLEAR_PRE_TEXT) {
            return Some(Self::ClearPreText);
        }
        if let Some(t) = text(DISPLAY_PRE_TEXT) {
            return Some(Self::DisplayPreText(t));
        }
        if flag(APPLICATION_START) {
            return Some(Self::ApplicationStart);
        }
        if let Some(t) = text(APPLICATION_THINKING) {
            return Some(Self::ApplicationThinking(t));
        }
        if let Some(c) = text(APPLICATION_CODE) {
            return Some(Self::ApplicationCode(c));
        }
        if flag(APPLICATION_END) {
            return Some(Self::ApplicationEnd);
        }
        None
    }

    /// Returns the wire field name for this variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ClearPreText => CLEAR_PRE_TEXT,
            Self::DisplayPreText(_) => DISPLAY_PRE_TEXT,
            Self::ApplicationStart => APPLICATION_START,
            Self::ApplicationThinking(_) => APPLICATION_THINKING,
            Self::ApplicationCode(_) => APPLICATION_CODE,
            Self::ApplicationEnd => APPLICATION_END,
        }
    }

    /// Returns the text payload, if this variant carries one.
    pub fn payload(&self) -> Option<&str> {
        match self {
            Self::DisplayPreText(t) | Self::ApplicationThinking(t) | Self::ApplicationCode(t) => {
                Some(t)
            }
            Self::ClearPreText | Self::ApplicationStart | Self::ApplicationEnd => None,
        }
    }

    /// Encodes this message back into its wire shape.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl Serialize for ServerMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self.payload() {
            Some(text) => map.serialize_entry(self.kind(), text)?,
            None => map.serialize_entry(self.kind(), &true)?,
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decodes_each_variant() {
        assert_eq!(
            ServerMessage::decode(&json!({ "clear-pre-text": true })),
            Some(ServerMessage::ClearPreText)
        );
        assert_eq!(
            ServerMessage::decode(&json!({ "display-pre-text": "hello" })),
            Some(ServerMessage::DisplayPreText("hello".into()))
        );
        assert_eq!(
            ServerMessage::decode(&json!({ "web-application-start": true })),
            Some(ServerMessage::ApplicationStart)
        );
        assert_eq!(
            ServerMessage::decode(&json!({ "web-application-thinking": "hmm" })),
            Some(ServerMessage::ApplicationThinking("hmm".into()))
        );
        assert_eq!(
            ServerMessage::decode(&json!({ "web-application-code": "<p>" })),
            Some(ServerMessage::ApplicationCode("<p>".into()))
        );
        assert_eq!(
            ServerMessage::decode(&json!({ "web-application-end": true })),
            Some(ServerMessage::ApplicationEnd)
        );
    }

    #[test]
    fn test_unrecognized_shapes_are_inert() {
        assert_eq!(ServerMessage::decode(&json!({})), None);
        assert_eq!(ServerMessage::decode(&json!({ "bot-ready": true })), None);
        assert_eq!(ServerMessage::decode(&json!("display-pre-text")), None);
        assert_eq!(ServerMessage::decode(&json!([{ "clear-pre-text": true }])), None);
        assert_eq!(ServerMessage::decode(&Value::Null), None);
    }

    #[test]
    fn test_first_recognized_field_wins() {
        let msg = json!({
            "web-application-end": true,
            "web-application-code": "<b>",
            "display-pre-text": "text",
        });
        assert_eq!(
            ServerMessage::decode(&msg),
            Some(ServerMessage::DisplayPreText("text".into()))
        );

        let msg = json!({ "clear-pre-text": true, "display-pre-text": "text" });
        assert_eq!(ServerMessage::decode(&msg), Some(ServerMessage::ClearPreText));
    }

    #[test]
    fn test_wrong_type_counts_as_absent() {
        let msg = json!({ "clear-pre-text": "yes", "web-application-code": "x" });
        assert_eq!(
            ServerMessage::decode(&msg),
            Some(ServerMessage::ApplicationCode("x".into()))
        );
        assert_eq!(ServerMessage::decode(&json!({ "display-pre-text": 5 })), None);
        assert_eq!(ServerMessage::decode(&json!({ "web-application-start": 1 })), None);
        assert_eq!(ServerMessage::decode(&json!({ "web-application-end": "yes" })), None);
        assert_eq!(ServerMessage::decode(&json!({ "web-application-end": {} })), None);
    }

    #[test]
    fn test_false_flags_are_ignored() {
        assert_eq!(ServerMessage::decode(&json!({ "clear-pre-text": false })), None);
        let msg = json!({ "web-application-start": false, "web-application-end": true });
        assert_eq!(ServerMessage::decode(&msg), Some(ServerMessage::ApplicationEnd));
    }

    #[test]
    fn test_empty_text_is_a_valid_payload() {
        assert_eq!(
            ServerMessage::decode(&json!({ "display-pre-text": "" })),
            Some(ServerMessage::DisplayPreText(String::new()))
        );
    }

    #[test]
    fn test_to_value_uses_wire_shape() {
        assert_eq!(
            ServerMessage::ApplicationCode("<html>".into()).to_value(),
            json!({ "web-application-code": "<html>" })
        );
        assert_eq!(
            ServerMessage::ApplicationEnd.to_value(),
            json!({ "web-application-end": true })
        );
    }
}
