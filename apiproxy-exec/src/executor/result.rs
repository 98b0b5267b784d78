use crate::executor::http::TransportError;
use crate::executor::HttpResponseParts;

#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("url or urls is required")]
    MissingTarget,
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("all urls failed ({attempted} tried)")]
    AllEndpointsFailed { attempted: usize },
    /// The request completed but the response did not pass the success check.
    #[error("status code {status} is not in success codes")]
    UnsuccessfulStatus {
        status: u16,
        response: Box<HttpResponseParts>,
    },
}

impl ExecError {
    /// The response that came with the error, if any. Only `UnsuccessfulStatus` carries one.
    pub fn response(&self) -> Option<&HttpResponseParts> {
        match self {
            ExecError::UnsuccessfulStatus { response, .. } => Some(response),
            _ => None,
        }
    }

    pub fn into_response(self) -> Option<HttpResponseParts> {
        match self {
            ExecError::UnsuccessfulStatus { response, .. } => Some(*response),
            _ => None,
        }
    }
}
