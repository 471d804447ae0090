//! Incremental text decoding for streamed responses.
//!
//! Streaming models send the reply as raw UTF-8 bytes in arbitrary network
//! chunks. A multi-byte character may be split across two chunks, so bytes
//! are buffered until they form complete characters before being emitted.

use futures_util::{stream, Stream, StreamExt};

use crate::{TextStream, TransportError};

/// Buffers a byte stream and yields only complete UTF-8 text.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of bytes and return all text that is now complete.
    ///
    /// Invalid sequences are replaced with U+FFFD. An incomplete trailing
    /// sequence is kept for the next call.
    pub fn push(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);
        let mut out = String::new();

        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(text) => {
                    out.push_str(text);
                    self.pending.clear();
                    break;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    out.push_str(std::str::from_utf8(&self.pending[..valid]).unwrap_or_default());
                    match e.error_len() {
                        Some(bad) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid + bad);
                        }
                        None => {
                            self.pending.drain(..valid);
                            break;
                        }
                    }
                }
            }
        }

        out
    }

    /// Flush whatever is left at end of stream.
    pub fn finish(&mut self) -> String {
        let rest = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        rest
    }
}

struct DecodeState<S> {
    inner: S,
    decoder: Utf8Decoder,
    done: bool,
}

/// Turn a byte stream (e.g. `reqwest::Response::bytes_stream`) into a
/// [`TextStream`] of non-empty text fragments.
///
/// A read error ends the stream after being yielded once.
pub fn decode_text_stream<S, B, E>(bytes: S) -> TextStream
where
    S: Stream<Item = Result<B, E>> + Send + Unpin + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    let state = DecodeState {
        inner: bytes,
        decoder: Utf8Decoder::new(),
        done: false,
    };

    Box::pin(stream::unfold(state, |mut state| async move {
        loop {
            if state.done {
                return None;
            }
            match state.inner.next().await {
                Some(Ok(chunk)) => {
                    let text = state.decoder.push(chunk.as_ref());
                    if !text.is_empty() {
                        return Some((Ok(text), state));
                    }
                }
                Some(Err(e)) => {
                    state.done = true;
                    return Some((Err(TransportError::Network(e.to_string())), state));
                }
                None => {
                    state.done = true;
                    let rest = state.decoder.finish();
                    if !rest.is_empty() {
                        return Some((Ok(rest), state));
                    }
                }
            }
        }
    }))
}
