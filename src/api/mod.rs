//! HTTP client for the echo API.
//!
//! [`EchoClient`] performs exactly one request per operation against a single
//! base endpoint. Both operations send `Content-Type: application/json` and
//! decode the response body as untyped JSON. Nothing is retried or cached;
//! every failure is returned to the caller.

mod error;
mod types;

use log::debug;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::{Map, Value};
use std::time::Duration;

pub use self::error::ApiError;
pub use self::types::{DEFAULT_ENDPOINT, Endpoint, EndpointError, Method};

/// Request body accepted by [`EchoClient::post`].
pub type RequestPayload = Map<String, Value>;

/// Decoded response body. The service contract is "valid JSON", nothing more.
pub type ResponsePayload = Value;

fn build_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("echo-client/", env!("CARGO_PKG_VERSION"))),
    );
    headers
}

/// Client bound to one immutable endpoint.
#[derive(Debug, Clone)]
pub struct EchoClient {
    client: reqwest::Client,
    endpoint: Endpoint,
}

impl EchoClient {
    /// Create a client for `endpoint` with no request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`reqwest::Error`] if the underlying HTTP client cannot be
    /// initialised (for example when the TLS backend fails to load).
    pub fn new(endpoint: Endpoint) -> Result<Self, reqwest::Error> {
        Self::with_timeout(endpoint, None)
    }

    /// Create a client, optionally bounding every request by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`reqwest::Error`] if the underlying HTTP client cannot be
    /// initialised.
    pub fn with_timeout(
        endpoint: Endpoint,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().default_headers(build_headers());
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Issue a GET against the endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] for non-2xx responses,
    /// [`ApiError::Transport`] when the request cannot complete and
    /// [`ApiError::Decode`] when the body is not JSON.
    pub async fn get(&self) -> Result<ResponsePayload, ApiError> {
        self.send(Method::Get, None).await
    }

    /// Issue a POST carrying `payload` as the JSON body.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`EchoClient::get`].
    pub async fn post(&self, payload: &RequestPayload) -> Result<ResponsePayload, ApiError> {
        self.send(Method::Post, Some(payload)).await
    }

    /// Issue a POST with an empty JSON object as the body.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`EchoClient::get`].
    pub async fn post_default(&self) -> Result<ResponsePayload, ApiError> {
        self.post(&RequestPayload::new()).await
    }

    async fn send(
        &self,
        method: Method,
        payload: Option<&RequestPayload>,
    ) -> Result<ResponsePayload, ApiError> {
        let mut request = self
            .client
            .request(method.into(), self.endpoint.as_url().clone());
        if let Some(body) = payload {
            request = request.json(body);
        }
        debug!("{method} {}", self.endpoint);
        let response = request
            .send()
            .await
            .map_err(|source| ApiError::Transport { method, source })?;
        let status = response.status().as_u16();
        debug!("{method} {} -> {status}", self.endpoint);
        if !(200..300).contains(&status) {
            return Err(ApiError::Status { method, status });
        }
        let body = response
            .bytes()
            .await
            .map_err(|source| ApiError::Transport { method, source })?;
        serde_json::from_slice(&body).map_err(|source| ApiError::Decode { method, source })
    }
}
