use std::collections::BTreeMap;
use std::time::Duration;

use apiproxy_exec::{HttpRequestParts, ReqwestTransport, Transport, TransportConfig, TransportError};

fn get(url: &str) -> HttpRequestParts {
    HttpRequestParts {
        method: "GET".to_string(),
        url: url.to_string(),
        headers: BTreeMap::new(),
        body: vec![],
    }
}

#[test]
fn default_config_caps_responses_at_four_mebibytes() {
    let config = TransportConfig::default();
    assert_eq!(config.max_response_bytes, 4 * 1024 * 1024);
    assert!(config.user_agent.starts_with("apiproxy/"));
    assert!(!config.accept_invalid_certs);
}

#[tokio::test]
async fn unparseable_url_is_an_invalid_request() {
    let transport = ReqwestTransport::default();
    let err = transport
        .send(get("not a url"), Duration::from_secs(1))
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::InvalidRequest(_)));
}

#[tokio::test]
async fn invalid_method_token_is_an_invalid_request() {
    let transport = ReqwestTransport::new(TransportConfig::default()).unwrap();
    let mut req = get("http://127.0.0.1:9/");
    req.method = "BAD METHOD".to_string();
    let err = transport.send(req, Duration::from_secs(1)).await.unwrap_err();
    assert!(matches!(err, TransportError::InvalidRequest(_)));
}
