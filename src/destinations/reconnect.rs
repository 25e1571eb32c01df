//! Reconnect policy for broker connections

use rand::Rng;
use serde::Deserialize;
use std::time::Duration;

/// How a broker connection behaves when the server is unreachable.
///
/// The default never gives up: failed initial connects are retried in the
/// background and reconnect attempts are unlimited.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReconnectPolicy {
    /// `None` means unlimited
    pub max_reconnects: Option<usize>,
    pub retry_on_failed_connect: bool,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_reconnects: None,
            retry_on_failed_connect: true,
            base_delay_ms: 100,
            max_delay_ms: 8_000,
        }
    }
}

impl ReconnectPolicy {
    #[must_use]
    pub fn with_max_reconnects(mut self, max_reconnects: Option<usize>) -> Self {
        self.max_reconnects = max_reconnects;
        self
    }

    #[must_use]
    pub fn with_retry_on_failed_connect(mut self, retry: bool) -> Self {
        self.retry_on_failed_connect = retry;
        self
    }

    #[must_use]
    pub fn with_delays(mut self, base_ms: u64, max_ms: u64) -> Self {
        self.base_delay_ms = base_ms;
        self.max_delay_ms = max_ms.max(base_ms);
        self
    }

    pub fn is_unlimited(&self) -> bool {
        self.max_reconnects.is_none()
    }

    /// Exponential backoff for reconnect `attempt` (1-based), capped at
    /// `max_delay_ms`, plus up to 10% jitter.
    pub fn delay_for(&self, attempt: usize) -> Duration {
        if attempt == 0 {
            return Duration::from_millis(0);
        }

        let exponent = u32::try_from(attempt - 1).unwrap_or(u32::MAX);
        let delay_ms = self
            .base_delay_ms
            .saturating_mul(2u64.saturating_pow(exponent));
        let capped = delay_ms.min(self.max_delay_ms);

        let jitter_range = capped / 10;
        let jitter = if jitter_range > 0 {
            rand::thread_rng().gen_range(0..jitter_range)
        } else {
            0
        };

        Duration::from_millis(capped + jitter)
    }
}
