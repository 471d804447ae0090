//! Session struct and history management.

use tracing::{debug, warn};

use crate::{Message, Role};

/// Identifies one lifetime of a session between resets.
///
/// Exchanges capture the generation they started under; a mutation tagged
/// with an older generation is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

/// Ordered conversation history plus a fixed system instruction.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    /// Sent ahead of every request; never part of `turns`.
    system_prompt: String,
    /// Committed user and assistant turns, oldest first.
    turns: Vec<Message>,
    generation: Generation,
}

impl ConversationSession {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            turns: Vec::new(),
            generation: Generation(0),
        }
    }

    /// Add a turn to the tail. System turns are rejected; the system
    /// instruction is fixed at construction.
    pub fn append(&mut self, turn: Message) {
        if turn.role == Role::System {
            warn!("Ignoring system turn appended to conversation history");
            return;
        }
        self.turns.push(turn);
    }

    /// Remove the tail turn if and only if it equals `turn`.
    ///
    /// Returns whether a turn was removed.
    pub fn rollback_last(&mut self, turn: &Message) -> bool {
        if self.turns.last() == Some(turn) {
            self.turns.pop();
            true
        } else {
            false
        }
    }

    /// Clear all turns and start a new generation. The system instruction
    /// is kept.
    pub fn reset(&mut self) {
        self.turns.clear();
        self.generation = Generation(self.generation.0 + 1);
        debug!(generation = self.generation.0, "Conversation reset");
    }

    /// The outbound request payload: system instruction followed by every
    /// turn in order.
    pub fn snapshot_for_request(&self) -> Vec<Message> {
        let mut msgs = Vec::with_capacity(self.turns.len() + 1);
        msgs.push(Message::system(self.system_prompt.clone()));
        msgs.extend(self.turns.iter().cloned());
        msgs
    }

    /// [`append`](Self::append), but only while `generation` is current.
    pub fn append_if_current(&mut self, generation: Generation, turn: Message) -> bool {
        if generation != self.generation {
            return false;
        }
        self.append(turn);
        true
    }

    /// [`rollback_last`](Self::rollback_last), but only while `generation`
    /// is current.
    pub fn rollback_last_if_current(&mut self, generation: Generation, turn: &Message) -> bool {
        generation == self.generation && self.rollback_last(turn)
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Committed turns, oldest first.
    pub fn turns(&self) -> &[Message] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> ConversationSession {
        ConversationSession::new("be helpful")
    }

    #[test]
    fn append_keeps_order() {
        let mut s = session();
        s.append(Message::user("hi"));
        s.append(Message::assistant("hello"));
        assert_eq!(s.turns(), &[Message::user("hi"), Message::assistant("hello")]);
    }

    #[test]
    fn append_rejects_system_turns() {
        let mut s = session();
        s.append(Message::system("override"));
        assert!(s.is_empty());
    }

    #[test]
    fn rollback_removes_matching_tail() {
        let mut s = session();
        s.append(Message::user("first"));
        s.append(Message::assistant("reply"));
        s.append(Message::user("second"));

        assert!(s.rollback_last(&Message::user("second")));
        assert_eq!(s.len(), 2);
        assert_eq!(s.turns().last(), Some(&Message::assistant("reply")));
    }

    #[test]
    fn rollback_ignores_non_matching_tail() {
        let mut s = session();
        s.append(Message::user("first"));
        s.append(Message::assistant("reply"));

        assert!(!s.rollback_last(&Message::user("first")));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn rollback_on_empty_is_noop() {
        let mut s = session();
        assert!(!s.rollback_last(&Message::user("anything")));
    }

    #[test]
    fn reset_clears_turns_but_keeps_prompt() {
        let mut s = session();
        s.append(Message::user("hi"));
        let before = s.generation();
        s.reset();
        assert!(s.is_empty());
        assert_eq!(s.system_prompt(), "be helpful");
        assert!(s.generation() > before);
    }

    #[test]
    fn snapshot_starts_with_system_prompt() {
        let mut s = session();
        s.append(Message::user("hi"));
        let snapshot = s.snapshot_for_request();
        assert_eq!(snapshot, vec![Message::system("be helpful"), Message::user("hi")]);
        // Read-only
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn stale_generation_mutations_are_ignored() {
        let mut s = session();
        let stale = s.generation();
        s.append(Message::user("old question"));
        s.reset();

        assert!(!s.append_if_current(stale, Message::assistant("late reply")));
        assert!(!s.rollback_last_if_current(stale, &Message::user("old question")));
        assert!(s.is_empty());

        let current = s.generation();
        assert!(s.append_if_current(current, Message::user("new question")));
        assert!(s.rollback_last_if_current(current, &Message::user("new question")));
        assert!(s.is_empty());
    }
}
