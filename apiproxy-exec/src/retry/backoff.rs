use std::time::Duration;

use crate::executor::{HttpResponseParts, TransportError};

pub const DEFAULT_RETRY_MAX: usize = 3;
pub const DEFAULT_RETRY_WAIT_MIN: Duration = Duration::from_secs(1);
pub const DEFAULT_RETRY_WAIT_MAX: Duration = Duration::from_secs(30);

/// Same-endpoint retries for a single request, applied before a response reaches
/// failover or classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffConfig {
    /// Retries after the first attempt; zero disables retrying.
    pub retry_max: usize,
    pub retry_wait_min: Duration,
    pub retry_wait_max: Duration,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            retry_max: DEFAULT_RETRY_MAX,
            retry_wait_min: DEFAULT_RETRY_WAIT_MIN,
            retry_wait_max: DEFAULT_RETRY_WAIT_MAX,
        }
    }
}

impl BackoffConfig {
    pub fn none() -> Self {
        Self {
            retry_max: 0,
            ..Default::default()
        }
    }

    pub fn with_retry_max(mut self, retry_max: usize) -> Self {
        self.retry_max = retry_max;
        self
    }

    /// Wait before retry number `retry` (0-based): `wait_min * 2^retry` capped at
    /// `wait_max`, with jitter drawn between `wait_min` and that bound.
    pub fn delay(&self, retry: usize, rand_u64: impl Fn() -> u64) -> Duration {
        let min_ms = self.retry_wait_min.as_millis() as u64;
        let max_ms = (self.retry_wait_max.as_millis() as u64).max(min_ms);
        let exp = u32::try_from(retry).unwrap_or(u32::MAX).min(32);
        let raw_ms = min_ms.saturating_mul(1u64 << exp).min(max_ms);

        let span = raw_ms - min_ms;
        let jitter_ms = if span == 0 { 0 } else { rand_u64() % (span + 1) };
        Duration::from_millis(min_ms + jitter_ms)
    }
}

/// Connection-level failures and throttling or server errors are worth another try;
/// 501 and malformed requests are not.
pub fn should_retry(result: &Result<HttpResponseParts, TransportError>) -> bool {
    match result {
        Ok(resp) => resp.status == 429 || (resp.status >= 500 && resp.status != 501),
        Err(TransportError::Network(_)) | Err(TransportError::Other(_)) => true,
        Err(TransportError::Timeout)
        | Err(TransportError::InvalidRequest(_))
        | Err(TransportError::ResponseTooLarge { .. }) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_doubles_from_min_and_caps_at_max() {
        let cfg = BackoffConfig::default();
        let lowest = || 0;
        assert_eq!(cfg.delay(0, lowest), Duration::from_secs(1));
        assert_eq!(cfg.delay(3, lowest), Duration::from_secs(1));

        let highest = || u64::MAX - 1;
        let d = cfg.delay(2, highest);
        assert!(d >= Duration::from_secs(1) && d <= Duration::from_secs(4));
        assert!(cfg.delay(20, highest) <= Duration::from_secs(30));
    }

    #[test]
    fn retries_server_errors_but_not_501_or_client_errors() {
        assert!(should_retry(&Ok(HttpResponseParts::new(503))));
        assert!(should_retry(&Ok(HttpResponseParts::new(429))));
        assert!(!should_retry(&Ok(HttpResponseParts::new(501))));
        assert!(!should_retry(&Ok(HttpResponseParts::new(404))));
        assert!(!should_retry(&Ok(HttpResponseParts::new(200))));
        assert!(should_retry(&Err(TransportError::Network("refused".to_string()))));
        assert!(!should_retry(&Err(TransportError::Timeout)));
    }
}
