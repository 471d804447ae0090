//! Conversation session state.
//!
//! A `ConversationSession` holds the system instruction and the ordered
//! user/assistant turns of one chat. It performs no I/O; the engine owns
//! it and is the only writer.

mod manager;

pub use manager::{ConversationSession, Generation};
