//! Conversational response engine for Vita.
//!
//! Provides:
//! - A `Transport` seam over the remote inference API, with a Bytez client
//! - Incremental UTF-8 decoding of streamed responses
//! - Normalization of single-shot response payloads
//! - Conversation sessions with generation-tagged rollback
//! - The `ChatEngine` orchestrator: stream/batch fallback, rate-limit
//!   retry with countdown, and error classification

pub mod bytez;
pub mod engine;
pub mod payload;
pub mod prompt;
pub mod session;
pub mod streaming;

use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::Stream;

pub use bytez::{BytezClient, BytezConfig};
pub use engine::{
    ChatEngine, ChatError, ChatObserver, EngineOptions, ErrorKind, ResponseOutcome, RetrySchedule,
};
pub use payload::{BatchPayload, PayloadPiece};
pub use session::ConversationSession;

/// Incremental text fragments produced by a streaming transport.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String, TransportError>> + Send>>;

/// A remote model endpoint that can answer a conversation.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open an incremental response.
    ///
    /// Returns [`TransportError::StreamingUnsupported`] when the model can
    /// only answer with a single payload; callers should then use
    /// [`Transport::complete`].
    async fn stream(&self, messages: &[Message]) -> Result<TextStream, TransportError>;

    /// Request the whole response in one payload.
    async fn complete(&self, messages: &[Message]) -> Result<BatchPayload, TransportError>;
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// Failures reported by a [`Transport`].
///
/// Messages are phrased so that the text classifier in
/// [`engine::classify`] recognizes throttling and credential problems.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("streaming not supported by this model")]
    StreamingUnsupported,
    #[error("API key is not configured")]
    MissingCredential,
    #[error("API authentication failed: {0}")]
    Unauthorized(String),
    #[error("HTTP 429 too many requests: {0}")]
    RateLimited(String),
    #[error("Upstream error: {0}")]
    Api(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("no response within {0:?}")]
    Timeout(Duration),
}
