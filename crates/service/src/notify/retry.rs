use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

/// Exponential backoff between delivery attempts, capped at `backoff_max`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_base: Duration,
    backoff_max: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_base: Duration, backoff_max: Duration) -> Self {
        Self { max_attempts: max_attempts.max(1), backoff_base, backoff_max }
    }

    pub fn from_config(cfg: &configs::NotifyConfig) -> Self {
        Self::new(cfg.max_attempts, Duration::from_millis(cfg.backoff_base_ms), Duration::from_millis(cfg.backoff_max_ms))
    }

    pub fn max_attempts(&self) -> u32 { self.max_attempts }

    /// Delay after the given failed attempt (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let factor = 2_u32.saturating_pow(attempt - 1);
        self.backoff_base.saturating_mul(factor).min(self.backoff_max)
    }

    pub async fn wait_before_retry(&self, attempt: u32) {
        let delay = self.backoff(attempt);
        debug!(?delay, attempt, "waiting before retry");
        sleep(delay).await;
    }
}
