#![forbid(unsafe_code)]

//! Execution engine for apiproxy request definitions.
//!
//! Definitions and templates are parsed and rendered in `apiproxy-core`; this crate
//! sends them through a [`Transport`](crate::executor::Transport), fails over across
//! equivalent endpoints, and classifies the final response.

pub mod executor;
pub mod registry;
pub mod retry;

pub use crate::executor::{
    is_success, select_endpoints, ExecError, ExecOptions, Executor, HttpRequestParts,
    HttpResponseParts, ReqwestTransport, REQUEST_ID_HEADER, Transport, TransportConfig, TransportError,
};
pub use crate::registry::{Registry, RegistryError};
pub use crate::retry::{BackoffConfig, RetryPolicy, DEFAULT_RETRY_STATUSES};
