//! One attempt at getting a reply: stream if possible, otherwise fetch a
//! single payload and replay it as fragments.

use std::future::Future;
use std::time::Duration;

use futures_util::StreamExt;
use tracing::debug;

use crate::{Message, TextStream, Transport, TransportError};

use super::observer::Feedback;
use super::orchestrator::EngineOptions;

pub(crate) enum AttemptResult {
    Success(String),
    Failed {
        error: TransportError,
        /// Whether any fragment reached the observer before the failure.
        delivered: bool,
    },
}

/// Await `fut`, failing with [`TransportError::Timeout`] after `limit`.
async fn bounded<T>(
    limit: Option<Duration>,
    fut: impl Future<Output = Result<T, TransportError>>,
) -> Result<T, TransportError> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .unwrap_or(Err(TransportError::Timeout(limit))),
        None => fut.await,
    }
}

pub(crate) async fn run_attempt(
    transport: &dyn Transport,
    messages: &[Message],
    options: &EngineOptions,
    feedback: &mut Feedback<'_>,
) -> AttemptResult {
    feedback.thinking_start();

    match bounded(options.response_timeout, transport.stream(messages)).await {
        Ok(stream) => deliver_stream(stream, options.response_timeout, feedback).await,
        Err(TransportError::StreamingUnsupported) => {
            debug!("Streaming unsupported, requesting a single response");
            match bounded(options.response_timeout, transport.complete(messages)).await {
                Ok(payload) => {
                    let text = payload.into_text();
                    feedback.thinking_end();
                    replay_as_fragments(&text, options.fragment_delay, feedback).await;
                    AttemptResult::Success(text)
                }
                Err(error) => AttemptResult::Failed {
                    error,
                    delivered: false,
                },
            }
        }
        Err(error) => AttemptResult::Failed {
            error,
            delivered: false,
        },
    }
}

async fn deliver_stream(
    mut stream: TextStream,
    limit: Option<Duration>,
    feedback: &mut Feedback<'_>,
) -> AttemptResult {
    let mut full = String::new();
    let mut delivered = false;

    loop {
        match bounded(limit, async { stream.next().await.transpose() }).await {
            Ok(Some(fragment)) => {
                if fragment.is_empty() {
                    continue;
                }
                feedback.chunk(&fragment);
                full.push_str(&fragment);
                delivered = true;
            }
            Ok(None) => return AttemptResult::Success(full),
            Err(error) => return AttemptResult::Failed { error, delivered },
        }
    }
}

/// Split text into alternating runs of whitespace and non-whitespace.
/// Concatenating the result yields the input exactly.
pub(crate) fn split_fragments(text: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut start = 0;
    let mut prev_space: Option<bool> = None;

    for (i, ch) in text.char_indices() {
        let space = ch.is_whitespace();
        if prev_space.is_some_and(|prev| prev != space) {
            fragments.push(&text[start..i]);
            start = i;
        }
        prev_space = Some(space);
    }
    if start < text.len() {
        fragments.push(&text[start..]);
    }

    fragments
}

/// Emit a complete reply piece by piece with a short pause in between, so
/// callers see the same incremental delivery as with a real stream.
async fn replay_as_fragments(text: &str, delay: Duration, feedback: &mut Feedback<'_>) {
    let fragments = split_fragments(text);
    let last = fragments.len().saturating_sub(1);

    for (i, fragment) in fragments.into_iter().enumerate() {
        feedback.chunk(fragment);
        if i < last && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
