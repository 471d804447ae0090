//! Normalization of single-shot response payloads.
//!
//! Non-streaming models answer with one JSON `output` whose text can sit in
//! several places depending on the model family. The known shapes are
//! listed in [`BatchPayload`]; anything else is kept as raw JSON and
//! serialized as a last resort.

use serde_json::Value;

/// Known shapes of a single-shot response `output`.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchPayload {
    /// `"text"`
    Text(String),
    /// `{ "message": { "content": "text" } }`
    MessageContent(String),
    /// `{ "content": "text" }`
    Content(String),
    /// `[ piece, piece, ... ]`, concatenated in order.
    Pieces(Vec<PayloadPiece>),
    /// Unrecognized output.
    Opaque(Value),
}

/// One element of a list-shaped payload.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadPiece {
    /// `{ "generated_text": "text" }`
    GeneratedText(String),
    /// `{ "content": "text" }`
    Content(String),
    /// `{ "message": { "content": "text" } }`
    MessageContent(String),
    /// `"text"`
    Text(String),
    Opaque(Value),
}

/// Non-empty string at `value[key]`.
fn text_at<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key)?.as_str().filter(|s| !s.is_empty())
}

fn message_content(value: &Value) -> Option<&str> {
    text_at(value.get("message")?, "content")
}

impl BatchPayload {
    /// Classify a raw `output` value. Object shapes are tried in order:
    /// `message.content`, then `content`.
    pub fn from_value(value: Value) -> Self {
        if let Some(text) = message_content(&value) {
            return Self::MessageContent(text.to_string());
        }
        if let Some(text) = text_at(&value, "content") {
            return Self::Content(text.to_string());
        }
        match value {
            Value::String(text) => Self::Text(text),
            Value::Array(items) => {
                Self::Pieces(items.into_iter().map(PayloadPiece::from_value).collect())
            }
            other => Self::Opaque(other),
        }
    }

    /// Collapse the payload into the reply text.
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) | Self::MessageContent(text) | Self::Content(text) => text,
            Self::Pieces(pieces) => pieces.into_iter().map(PayloadPiece::into_text).collect(),
            Self::Opaque(value) => value.to_string(),
        }
    }
}

impl PayloadPiece {
    pub fn from_value(value: Value) -> Self {
        if let Some(text) = text_at(&value, "generated_text") {
            return Self::GeneratedText(text.to_string());
        }
        if let Some(text) = text_at(&value, "content") {
            return Self::Content(text.to_string());
        }
        if let Some(text) = message_content(&value) {
            return Self::MessageContent(text.to_string());
        }
        match value {
            Value::String(text) => Self::Text(text),
            other => Self::Opaque(other),
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::GeneratedText(text)
            | Self::Content(text)
            | Self::MessageContent(text)
            | Self::Text(text) => text,
            Self::Opaque(value) => value.to_string(),
        }
    }
}
