//! Application-level error type.

use ortho_config::OrthoError;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::api::{EndpointError, Method};
use crate::payload::PayloadError;
use crate::view::DispatchError;

/// Errors surfaced by the `echo-client` binary.
///
/// Request failures are rendered by the view before they reach this type;
/// [`EchoError::RequestFailed`] only carries the exit status.
#[derive(Error, Debug)]
pub enum EchoError {
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
    #[error("invalid POST payload: {0}")]
    Payload(#[from] PayloadError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("configuration error: {0}")]
    Config(#[from] Arc<OrthoError>),
    #[error("configuration error: no configuration file at {}", .0.display())]
    ConfigNotFound(PathBuf),
    #[error("{0} request failed")]
    RequestFailed(Method),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<OrthoError> for EchoError {
    fn from(err: OrthoError) -> Self {
        Self::Config(Arc::new(err))
    }
}
