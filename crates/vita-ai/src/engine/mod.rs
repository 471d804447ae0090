//! Response orchestration.
//!
//! [`ChatEngine::submit`] runs one exchange:
//! 1. the user turn is appended to the session,
//! 2. the transport is asked to stream; if it cannot, a single payload is
//!    fetched and replayed as whitespace-delimited fragments,
//! 3. rate-limit failures are retried per the [`RetrySchedule`] with a
//!    per-second countdown,
//! 4. success commits the reply; terminal failure rolls back the user turn
//!    and reports an [`ErrorKind`].

mod attempt;
pub mod classify;
mod guard;
mod observer;
mod orchestrator;
mod retry;


pub use classify::ErrorKind;
pub use observer::{ChatObserver, ResponseOutcome};
pub use orchestrator::{ChatEngine, ChatError, EngineOptions};
pub use retry::RetrySchedule;
