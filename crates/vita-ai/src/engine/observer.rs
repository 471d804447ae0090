//! Caller-facing callbacks and exchange outcomes.

use super::classify::ErrorKind;

/// Receives progress of one exchange.
///
/// Every exchange ends in exactly one `on_complete` or one `on_error`.
/// Fragments arrive in order and concatenate to the committed reply.
pub trait ChatObserver: Send {
    /// An incremental piece of the reply.
    fn on_chunk(&mut self, text: &str);

    /// The engine is waiting for the model and nothing has been produced
    /// for the current attempt yet.
    fn on_thinking_start(&mut self) {}

    /// Closes the interval opened by `on_thinking_start`.
    fn on_thinking_end(&mut self) {}

    /// The reply is complete and committed to the session.
    fn on_complete(&mut self) {}

    /// The exchange failed for good.
    fn on_error(&mut self, _kind: ErrorKind) {}

    /// Seconds left before the next attempt after being rate limited.
    /// Counts down once per second and ends with `0`.
    fn on_retry_wait(&mut self, _seconds_remaining: u64) {}
}

/// Result of one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseOutcome {
    Success(String),
    RateLimited,
    AuthError,
    UnknownError,
}

impl ResponseOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ResponseOutcome::Success(_))
    }

    /// The failure kind, or `None` on success.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            ResponseOutcome::Success(_) => None,
            ResponseOutcome::RateLimited => Some(ErrorKind::RateLimited),
            ResponseOutcome::AuthError => Some(ErrorKind::AuthError),
            ResponseOutcome::UnknownError => Some(ErrorKind::UnknownError),
        }
    }
}

impl From<ErrorKind> for ResponseOutcome {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::AuthError => ResponseOutcome::AuthError,
            ErrorKind::RateLimited => ResponseOutcome::RateLimited,
            ErrorKind::UnknownError => ResponseOutcome::UnknownError,
        }
    }
}

/// Wraps an observer so thinking brackets stay balanced: `end` only fires
/// after a matching `start`.
pub(crate) struct Feedback<'a> {
    observer: &'a mut dyn ChatObserver,
    thinking: bool,
}

impl<'a> Feedback<'a> {
    pub(crate) fn new(observer: &'a mut dyn ChatObserver) -> Self {
        Self {
            observer,
            thinking: false,
        }
    }

    pub(crate) fn thinking_start(&mut self) {
        if !self.thinking {
            self.thinking = true;
            self.observer.on_thinking_start();
        }
    }

    pub(crate) fn thinking_end(&mut self) {
        if self.thinking {
            self.thinking = false;
            self.observer.on_thinking_end();
        }
    }

    pub(crate) fn chunk(&mut self, text: &str) {
        self.thinking_end();
        self.observer.on_chunk(text);
    }

    pub(crate) fn retry_wait(&mut self, seconds_remaining: u64) {
        self.observer.on_retry_wait(seconds_remaining);
    }

    pub(crate) fn complete(&mut self) {
        self.thinking_end();
        self.observer.on_complete();
    }

    pub(crate) fn error(&mut self, kind: ErrorKind) {
        self.thinking_end();
        self.observer.on_error(kind);
    }
}
