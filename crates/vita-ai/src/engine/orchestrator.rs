//! The chat engine: drives one exchange per `submit` call.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::session::{ConversationSession, Generation};
use crate::{Message, Transport};

use super::attempt::{run_attempt, AttemptResult};
use super::classify::{classify, is_auth_failure, is_rate_limit};
use super::guard::BusyGuard;
use super::observer::{ChatObserver, Feedback, ResponseOutcome};
use super::retry::{countdown, RetrySchedule};

/// Tuning for exchanges.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Waits applied after successive rate-limit failures.
    pub schedule: RetrySchedule,
    /// Pause between fragments replayed from a single-payload response.
    pub fragment_delay: Duration,
    /// Longest wait for the transport to produce anything; `None` waits
    /// forever.
    pub response_timeout: Option<Duration>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            schedule: RetrySchedule::default(),
            fragment_delay: Duration::from_millis(15),
            response_timeout: Some(Duration::from_secs(60)),
        }
    }
}

/// Reasons a `submit` call is refused before anything happens.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("message is empty")]
    EmptyMessage,
    #[error("another exchange is already in progress")]
    Busy,
}

/// Rolls back the user turn of an exchange that is dropped before it
/// settles, e.g. when the caller cancels the `submit` future.
struct PendingTurn<'a> {
    session: &'a Mutex<ConversationSession>,
    generation: Generation,
    turn: Message,
    armed: bool,
}

impl PendingTurn<'_> {
    /// The exchange committed or rolled back on its own.
    fn settle(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingTurn<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        if session.rollback_last_if_current(self.generation, &self.turn) {
            debug!("Exchange cancelled, user turn rolled back");
        }
    }
}

/// Owns one conversation and runs exchanges against a transport.
///
/// At most one exchange runs at a time. [`reset`](Self::reset) may be
/// called while an exchange is in flight; that exchange still finishes and
/// reports to its observer, but it no longer touches the history.
pub struct ChatEngine {
    transport: Arc<dyn Transport>,
    session: Mutex<ConversationSession>,
    options: EngineOptions,
    busy: AtomicBool,
    /// Text of the most recent failed exchange, for manual retry.
    last_failed: Mutex<Option<String>>,
}

impl ChatEngine {
    pub fn new(transport: Arc<dyn Transport>, system_prompt: impl Into<String>) -> Self {
        Self {
            transport,
            session: Mutex::new(ConversationSession::new(system_prompt)),
            options: EngineOptions::default(),
            busy: AtomicBool::new(false),
            last_failed: Mutex::new(None),
        }
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    fn session(&self) -> MutexGuard<'_, ConversationSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn last_failed_slot(&self) -> MutexGuard<'_, Option<String>> {
        self.last_failed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a new conversation. The system instruction is kept.
    pub fn reset(&self) {
        self.session().reset();
        *self.last_failed_slot() = None;
        info!("Conversation reset");
    }

    /// Copy of the committed turns, oldest first.
    pub fn history(&self) -> Vec<Message> {
        self.session().turns().to_vec()
    }

    /// The payload the next request would start from.
    pub fn snapshot_for_request(&self) -> Vec<Message> {
        self.session().snapshot_for_request()
    }

    /// Text of the last exchange that failed, if it has not since been
    /// superseded by a success or a reset.
    pub fn last_failed(&self) -> Option<String> {
        self.last_failed_slot().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Run one exchange for `user_text`.
    ///
    /// Returns `Err` without invoking any callback when the text is blank
    /// or another exchange is in flight. Otherwise every failure is
    /// contained: the observer sees exactly one `on_complete` or
    /// `on_error`, and the returned outcome matches it.
    pub async fn submit(
        &self,
        user_text: &str,
        observer: &mut dyn ChatObserver,
    ) -> Result<ResponseOutcome, ChatError> {
        let text = user_text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let _guard = BusyGuard::acquire(&self.busy).ok_or(ChatError::Busy)?;

        let user_turn = Message::user(text);
        let (generation, messages) = {
            let mut session = self.session();
            session.append(user_turn.clone());
            (session.generation(), session.snapshot_for_request())
        };
        let pending = PendingTurn {
            session: &self.session,
            generation,
            turn: user_turn,
            armed: true,
        };
        debug!(?generation, turns = messages.len() - 1, "Starting exchange");

        let mut feedback = Feedback::new(observer);
        let mut attempt = 0;

        let last_error = loop {
            match run_attempt(self.transport.as_ref(), &messages, &self.options, &mut feedback)
                .await
            {
                AttemptResult::Success(reply) => {
                    let committed = self
                        .session()
                        .append_if_current(generation, Message::assistant(reply.clone()));
                    pending.settle();
                    if committed {
                        *self.last_failed_slot() = None;
                        info!(attempt, chars = reply.len(), "Exchange complete");
                    } else {
                        warn!("Conversation was reset during the exchange, reply not recorded");
                    }
                    feedback.complete();
                    return Ok(ResponseOutcome::Success(reply));
                }
                AttemptResult::Failed { error, delivered } => {
                    feedback.thinking_end();
                    let message = error.to_string();

                    // Retrying after partial delivery would repeat text the
                    // caller already has.
                    let retryable =
                        !delivered && is_rate_limit(&message) && !is_auth_failure(&message);
                    if retryable {
                        if let Some(delay) = self.options.schedule.delay_for(attempt) {
                            warn!(
                                attempt,
                                delay_secs = delay.as_secs_f64(),
                                error = %message,
                                "Rate limited, retrying"
                            );
                            countdown(delay, &mut feedback).await;
                            attempt += 1;
                            continue;
                        }
                    }
                    break message;
                }
            }
        };

        let current = {
            let mut session = self.session();
            let current = session.generation() == generation;
            session.rollback_last_if_current(generation, &pending.turn);
            current
        };
        pending.settle();
        if current {
            *self.last_failed_slot() = Some(text.to_string());
        } else {
            debug!("Conversation was reset during the exchange, nothing to roll back");
        }

        let kind = classify(&last_error);
        warn!(?kind, attempts = attempt + 1, error = %last_error, "Exchange failed");
        feedback.error(kind);
        Ok(kind.into())
    }
}
