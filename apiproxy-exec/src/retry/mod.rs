mod backoff;

pub use backoff::{
    should_retry, BackoffConfig, DEFAULT_RETRY_MAX, DEFAULT_RETRY_WAIT_MAX, DEFAULT_RETRY_WAIT_MIN,
};

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use apiproxy_core::FallbackConfig;

use crate::executor::HttpResponseParts;

/// Statuses that move failover on to the next endpoint unless overridden.
pub const DEFAULT_RETRY_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

type RetryPredicate = dyn Fn(&HttpResponseParts) -> bool + Send + Sync;

/// Decides whether a response is retry-eligible, i.e. whether failover should try the
/// next endpoint instead of returning it.
#[derive(Clone)]
pub enum RetryPolicy {
    Statuses(BTreeSet<u16>),
    Custom(Arc<RetryPredicate>),
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::Statuses(DEFAULT_RETRY_STATUSES.into_iter().collect())
    }
}

impl RetryPolicy {
    /// Default statuses plus the definition's `retry_codes`.
    pub fn for_fallback(fallback: &FallbackConfig) -> Self {
        let mut statuses: BTreeSet<u16> = DEFAULT_RETRY_STATUSES.into_iter().collect();
        statuses.extend(fallback.retry_codes.iter().copied());
        RetryPolicy::Statuses(statuses)
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&HttpResponseParts) -> bool + Send + Sync + 'static,
    {
        RetryPolicy::Custom(Arc::new(f))
    }

    pub fn is_retry_eligible(&self, resp: &HttpResponseParts) -> bool {
        match self {
            RetryPolicy::Statuses(statuses) => statuses.contains(&resp.status),
            RetryPolicy::Custom(f) => f(resp),
        }
    }
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryPolicy::Statuses(s) => f.debug_tuple("Statuses").field(s).finish(),
            RetryPolicy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_codes_extend_the_defaults() {
        let fallback = FallbackConfig {
            retry_codes: [418u16].into_iter().collect(),
            ..Default::default()
        };
        let policy = RetryPolicy::for_fallback(&fallback);
        assert!(policy.is_retry_eligible(&HttpResponseParts::new(418)));
        assert!(policy.is_retry_eligible(&HttpResponseParts::new(503)));
        assert!(!policy.is_retry_eligible(&HttpResponseParts::new(404)));
    }

    #[test]
    fn custom_predicate_replaces_status_set() {
        let policy = RetryPolicy::custom(|r| r.header("x-retry").is_some());
        assert!(!policy.is_retry_eligible(&HttpResponseParts::new(503)));
        assert!(policy.is_retry_eligible(&HttpResponseParts::new(200).with_header("X-Retry", "1")));
    }
}
