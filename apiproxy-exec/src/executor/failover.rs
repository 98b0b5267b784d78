use std::collections::BTreeMap;
use std::time::Instant;

use crate::executor::attempt::send_with_backoff;
use crate::executor::http::Transport;
use crate::executor::{ExecError, HttpRequestParts, HttpResponseParts};
use crate::retry::{BackoffConfig, RetryPolicy};

/// Tries `endpoints` in order, one attempt each, and returns the first response that is
/// not retry-eligible. Whether that response is a success is decided by the caller.
///
/// Endpoints are never retried in place; the next endpoint is the retry.
pub async fn execute_failover(
    transport: &dyn Transport,
    method: &str,
    endpoints: &[String],
    headers: &BTreeMap<String, String>,
    body: &[u8],
    retry: &RetryPolicy,
    deadline: Instant,
) -> Result<HttpResponseParts, ExecError> {
    let no_retry = BackoffConfig::none();
    for url in endpoints {
        let req = HttpRequestParts {
            method: method.to_string(),
            url: url.clone(),
            headers: headers.clone(),
            body: body.to_vec(),
        };
        match send_with_backoff(transport, req, deadline, &no_retry).await {
            Ok(resp) if retry.is_retry_eligible(&resp) => {
                tracing::warn!(url = %url, status = resp.status, "retry-eligible response, trying next url");
            }
            Ok(resp) => return Ok(resp),
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "request failed, trying next url");
            }
        }
    }
    Err(ExecError::AllEndpointsFailed {
        attempted: endpoints.len(),
    })
}
