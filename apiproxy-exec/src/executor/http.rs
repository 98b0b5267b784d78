use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::executor::{HttpRequestParts, HttpResponseParts};

/// Hard cap on buffered response bodies unless configured otherwise.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 4 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("timeout")]
    Timeout,
    #[error("connect/dns/tls error: {0}")]
    Network(String),
    #[error("response too large (>{max_bytes} bytes)")]
    ResponseTooLarge { max_bytes: usize },
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("http error: {0}")]
    Other(String),
}

/// Sends one HTTP request. `timeout` bounds the whole exchange including the body read.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        req: HttpRequestParts,
        timeout: Duration,
    ) -> Result<HttpResponseParts, TransportError>;
}

#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub max_response_bytes: usize,
    /// Sent with every request; per-request headers of the same name win.
    pub default_headers: BTreeMap<String, String>,
    pub accept_invalid_certs: bool,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
            default_headers: BTreeMap::new(),
            accept_invalid_certs: false,
            user_agent: concat!("apiproxy/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

pub struct ReqwestTransport {
    client: reqwest::Client,
    config: TransportConfig,
}

impl ReqwestTransport {
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(TransportConfig::default()).unwrap_or_else(|e| {
            panic!("failed to create reqwest HTTP client: {e}. This is a bug - please report it.");
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        req: HttpRequestParts,
        timeout: Duration,
    ) -> Result<HttpResponseParts, TransportError> {
        let method = reqwest::Method::from_bytes(req.method.as_bytes())
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        let url = url::Url::parse(&req.url)
            .map_err(|e| TransportError::InvalidRequest(format!("{}: {e}", req.url)))?;

        let mut headers = self.config.default_headers.clone();
        for (k, v) in req.headers {
            headers.retain(|existing, _| !existing.eq_ignore_ascii_case(&k));
            headers.insert(k, v);
        }

        let mut rb = self.client.request(method, url).timeout(timeout);
        for (k, v) in headers {
            rb = rb.header(k, v);
        }
        if !req.body.is_empty() {
            rb = rb.body(req.body);
        }

        let resp = rb.send().await.map_err(map_reqwest_error)?;
        let status = resp.status().as_u16();

        let mut headers = BTreeMap::new();
        for (k, v) in resp.headers().iter() {
            if let Ok(s) = v.to_str() {
                headers.insert(k.to_string(), s.to_string());
            }
        }

        let max_bytes = self.config.max_response_bytes;
        if resp.content_length().is_some_and(|len| len > max_bytes as u64) {
            return Err(TransportError::ResponseTooLarge { max_bytes });
        }
        let body = resp.bytes().await.map_err(map_reqwest_error)?;
        if body.len() > max_bytes {
            return Err(TransportError::ResponseTooLarge { max_bytes });
        }

        Ok(HttpResponseParts {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        return TransportError::Timeout;
    }
    if e.is_connect() || e.is_request() {
        return TransportError::Network(e.to_string());
    }
    if e.is_builder() {
        return TransportError::InvalidRequest(e.to_string());
    }
    TransportError::Other(e.to_string())
}
