use std::time::Duration;

use crate::retry::config::RetryConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    RetryAfter { delay: Duration, reason: RetryReason },
    Stop { reason: RetryReason },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryReason {
    NotRetryable(u16),
    AttemptsExhausted,
    NetworkFailure,
    HttpStatus(u16),
}

/// Decide whether a failed attempt is retried and how long to wait first.
///
/// - `attempt_no`: 1-based number of the attempt that just failed.
/// - `http_status`: response status, or `None` when no response arrived.
///   Transport failures without a response are never retried.
pub fn decide_retry(cfg: &RetryConfig, attempt_no: usize, http_status: Option<u16>) -> RetryDecision {
    let Some(status) = http_status else {
        return RetryDecision::Stop {
            reason: RetryReason::NetworkFailure,
        };
    };

    if !cfg.is_retryable_status(status) {
        return RetryDecision::Stop {
            reason: RetryReason::NotRetryable(status),
        };
    }

    // attempts = initial + retries
    if attempt_no > cfg.max_retries {
        return RetryDecision::Stop {
            reason: RetryReason::AttemptsExhausted,
        };
    }

    RetryDecision::RetryAfter {
        delay: cfg.delay_for(attempt_no),
        reason: RetryReason::HttpStatus(status),
    }
}
