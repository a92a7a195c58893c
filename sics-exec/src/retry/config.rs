use std::time::Duration;

/// Backoff policy for 5xx responses.
///
/// Retry `n` (1-based) waits `base_delay * factor^n`, so the defaults give
/// 2s, 4s, 8s, ...
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt; `0` disables retrying.
    pub max_retries: usize,
    pub base_delay: Duration,
    pub factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
            factor: 2.0,
        }
    }
}

impl RetryConfig {
    pub fn with_max_retries(max_retries: usize) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    pub fn is_retryable_status(&self, status: u16) -> bool {
        (500..=599).contains(&status)
    }

    pub fn delay_for(&self, retry_no: usize) -> Duration {
        let exp = i32::try_from(retry_no).unwrap_or(i32::MAX);
        let ms = (self.base_delay.as_millis() as f64) * self.factor.powi(exp);
        Duration::from_millis(ms.clamp(0.0, u64::MAX as f64) as u64)
    }
}
