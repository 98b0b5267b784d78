use std::sync::Arc;
use std::time::Instant;

use apiproxy_core::{new_id, Definition, DEFAULT_TIMEOUT};

use crate::executor::attempt::{send_with_backoff, REQUEST_ID_HEADER};
use crate::executor::failover::execute_failover;
use crate::executor::http::{ReqwestTransport, Transport};
use crate::executor::{is_success, select_endpoints, ExecError, ExecOptions, HttpRequestParts, HttpResponseParts};
use crate::retry::{BackoffConfig, RetryPolicy};

/// Runs normalized definitions: direct or failover dispatch, then success classification.
#[derive(Clone)]
pub struct Executor {
    transport: Arc<dyn Transport>,
    backoff: BackoffConfig,
}

impl Executor {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            backoff: BackoffConfig::default(),
        }
    }

    /// Retry settings for single-`url` definitions. Failover never retries in place.
    pub fn with_backoff(mut self, backoff: BackoffConfig) -> Self {
        self.backoff = backoff;
        self
    }

    pub async fn execute(&self, def: &Definition) -> Result<HttpResponseParts, ExecError> {
        self.execute_with(def, &ExecOptions::default()).await
    }

    /// Sends `def` and classifies the outcome.
    ///
    /// A response that fails the success check comes back inside
    /// [`ExecError::UnsuccessfulStatus`].
    pub async fn execute_with(
        &self,
        def: &Definition,
        opts: &ExecOptions,
    ) -> Result<HttpResponseParts, ExecError> {
        let deadline = opts.deadline.unwrap_or_else(|| {
            let timeout = if def.config.timeout.is_zero() {
                DEFAULT_TIMEOUT
            } else {
                def.config.timeout
            };
            Instant::now() + timeout
        });

        let mut headers = def.headers.clone();
        if !headers.keys().any(|k| k.eq_ignore_ascii_case(REQUEST_ID_HEADER)) {
            headers.insert(REQUEST_ID_HEADER.to_string(), new_id());
        }

        let resp = if !def.url.is_empty() {
            let req = HttpRequestParts {
                method: def.method.clone(),
                url: def.url.clone(),
                headers,
                body: def.body.clone().into_bytes(),
            };
            send_with_backoff(self.transport.as_ref(), req, deadline, &self.backoff).await?
        } else if !def.urls.is_empty() {
            let endpoints = select_endpoints(&def.urls, def.config.fallback.selector);
            let retry = opts
                .retry
                .clone()
                .unwrap_or_else(|| RetryPolicy::for_fallback(&def.config.fallback));
            execute_failover(
                self.transport.as_ref(),
                &def.method,
                &endpoints,
                &headers,
                def.body.as_bytes(),
                &retry,
                deadline,
            )
            .await?
        } else {
            return Err(ExecError::MissingTarget);
        };

        if is_success(&def.config.checker, &resp) {
            Ok(resp)
        } else {
            tracing::debug!(name = %def.name, status = resp.status, "response failed success check");
            Err(ExecError::UnsuccessfulStatus {
                status: resp.status,
                response: Box::new(resp),
            })
        }
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestTransport::default()))
    }
}
