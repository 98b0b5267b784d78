mod attempt;
mod classify;
mod engine;
mod failover;
pub mod http;
mod result;
mod select;
mod types;

pub use attempt::{send_with_backoff, REQUEST_ID_HEADER};
pub use classify::is_success;
pub use engine::Executor;
pub use failover::execute_failover;
pub use http::{ReqwestTransport, Transport, TransportConfig, TransportError};
pub use result::ExecError;
pub use select::select_endpoints;
pub use types::{ExecOptions, HttpRequestParts, HttpResponseParts};
