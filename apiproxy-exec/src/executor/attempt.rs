use std::time::Instant;

use crate::executor::http::{Transport, TransportError};
use crate::executor::{HttpRequestParts, HttpResponseParts};
use crate::retry::{should_retry, BackoffConfig};

/// Header carrying the per-invocation request id.
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Sends `req`, retrying the same endpoint per `backoff` while the deadline allows.
///
/// The last outcome is returned once retries run out or the next wait would end past
/// `deadline`.
pub async fn send_with_backoff(
    transport: &dyn Transport,
    req: HttpRequestParts,
    deadline: Instant,
    backoff: &BackoffConfig,
) -> Result<HttpResponseParts, TransportError> {
    let mut retry = 0;
    loop {
        let result = send_once(transport, req.clone(), deadline, retry).await;
        if retry >= backoff.retry_max || !should_retry(&result) {
            return result;
        }

        let delay = backoff.delay(retry, || fastrand::u64(..));
        if Instant::now() + delay >= deadline {
            tracing::debug!(url = %req.url, retry, "deadline too close for another retry");
            return result;
        }
        tokio::time::sleep(delay).await;
        retry += 1;
    }
}

/// One request bounded by what is left of `deadline`. An already expired deadline
/// fails with [`TransportError::Timeout`] without sending.
async fn send_once(
    transport: &dyn Transport,
    req: HttpRequestParts,
    deadline: Instant,
    retry: usize,
) -> Result<HttpResponseParts, TransportError> {
    let remaining = deadline.saturating_duration_since(Instant::now());
    if remaining.is_zero() {
        return Err(TransportError::Timeout);
    }

    let method = req.method.clone();
    let url = req.url.clone();
    let request_id = req
        .headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(REQUEST_ID_HEADER))
        .map(|(_, v)| v.clone())
        .unwrap_or_default();
    tracing::debug!(%method, %url, %request_id, retry, "sending request");

    let result = match tokio::time::timeout(remaining, transport.send(req, remaining)).await {
        Ok(result) => result,
        Err(_) => Err(TransportError::Timeout),
    };
    match &result {
        Ok(resp) if resp.status >= 400 => {
            tracing::warn!(%method, %url, %request_id, status = resp.status, "error response");
        }
        Ok(resp) => {
            tracing::debug!(%method, %url, %request_id, status = resp.status, "response");
        }
        Err(e) => {
            tracing::debug!(%method, %url, %request_id, error = %e, "request failed");
        }
    }
    result
}
