//! Errors raised by [`EchoClient`](super::EchoClient) operations.

use thiserror::Error;

use super::Method;

/// A failed request.
///
/// The display text is what the view shows to the user, so the status
/// variant keeps the `"<METHOD> request failed: <status>"` shape.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server answered with a status outside the 2xx range.
    #[error("{method} request failed: {status}")]
    Status { method: Method, status: u16 },
    /// The request could not be completed (DNS, connect, TLS, reading the body).
    #[error("{method} request could not be completed: {source}")]
    Transport {
        method: Method,
        #[source]
        source: reqwest::Error,
    },
    /// A success response carried a body that is not valid JSON.
    #[error("{method} response was not valid JSON: {source}")]
    Decode {
        method: Method,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Method of the request that failed.
    #[must_use]
    pub const fn method(&self) -> Method {
        match self {
            Self::Status { method, .. }
            | Self::Transport { method, .. }
            | Self::Decode { method, .. } => *method,
        }
    }

    /// Status code when the failure was a non-2xx response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
