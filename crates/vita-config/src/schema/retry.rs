//! Rate-limit retry and response pacing configuration.

use serde::{Deserialize, Serialize};

/// Retry schedule and delivery pacing for chat exchanges.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Wait before each retry after a rate-limit failure, in seconds.
    /// One entry is consumed per failure; the exchange fails once exhausted.
    pub delays_secs: Vec<u32>,
    /// Pause between synthesized fragments when the model cannot stream.
    pub fragment_delay_ms: u32,
    /// Longest wait for the transport to produce anything (valid range: 0-600, 0 = none).
    pub response_timeout_secs: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            delays_secs: vec![3, 6, 10],
            fragment_delay_ms: 15,
            response_timeout_secs: 60,
        }
    }
}
