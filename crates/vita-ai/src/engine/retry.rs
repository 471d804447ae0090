//! Rate-limit retry schedule and countdown.

use std::time::Duration;

use super::observer::Feedback;

/// Waits applied after successive rate-limit failures, consumed left to
/// right. Once exhausted, the next rate-limit failure is terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrySchedule {
    delays: Vec<Duration>,
}

impl RetrySchedule {
    pub fn new(delays: Vec<Duration>) -> Self {
        Self { delays }
    }

    pub fn from_secs(secs: &[u32]) -> Self {
        Self::new(
            secs.iter()
                .map(|s| Duration::from_secs(u64::from(*s)))
                .collect(),
        )
    }

    /// A schedule that never retries.
    pub fn none() -> Self {
        Self::new(Vec::new())
    }

    /// Wait before retrying after failed attempt number `attempt`, or
    /// `None` when the schedule is exhausted.
    pub fn delay_for(&self, attempt: usize) -> Option<Duration> {
        self.delays.get(attempt).copied()
    }

    /// Number of retries available.
    pub fn len(&self) -> usize {
        self.delays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }
}

impl Default for RetrySchedule {
    fn default() -> Self {
        Self::from_secs(&[3, 6, 10])
    }
}

/// Whole seconds shown for a wait, rounded up.
fn countdown_secs(delay: Duration) -> u64 {
    let secs = delay.as_secs();
    if delay.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}

/// Sleep for `delay`, reporting the seconds remaining once per second and
/// `0` when done.
pub(crate) async fn countdown(delay: Duration, feedback: &mut Feedback<'_>) {
    for remaining in (1..=countdown_secs(delay)).rev() {
        feedback.retry_wait(remaining);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
    feedback.retry_wait(0);
}
