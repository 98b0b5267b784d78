use apiproxy_core::Checker;

use crate::executor::HttpResponseParts;

/// A response succeeds when its status is an accepted success code and every
/// `header_match` entry equals the response header exactly. The body is not inspected.
pub fn is_success(checker: &Checker, resp: &HttpResponseParts) -> bool {
    if !checker.accepts_status(resp.status) {
        return false;
    }
    checker
        .header_match
        .iter()
        .all(|(name, expected)| resp.header(name) == Some(expected.as_str()))
}
