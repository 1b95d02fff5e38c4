//! Types shared by the echo API client.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use url::Url;

/// Echo API endpoint used when no override is configured.
pub const DEFAULT_ENDPOINT: &str = "https://ujxtgteuma.execute-api.ap-northeast-1.amazonaws.com/prod";

static DEFAULT_URL: LazyLock<Url> =
    LazyLock::new(|| Url::parse(DEFAULT_ENDPOINT).expect("valid default endpoint"));

/// HTTP method issued by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    /// Upper-case label used in messages and the method badge.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }

    /// Message shown when a failure carries no text of its own.
    #[must_use]
    pub const fn fallback_message(self) -> &'static str {
        match self {
            Self::Get => "GET request failed",
            Self::Post => "POST request failed",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
        }
    }
}

/// Base URL targeted by both operations.
///
/// Only absolute `http` and `https` URLs are accepted. The URL is used as-is:
/// no path segments are appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint(Url);

/// Reasons an endpoint string is rejected.
#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    #[error("invalid endpoint URL: {0}")]
    Parse(#[from] url::ParseError),
    #[error("unsupported endpoint scheme `{0}`; expected http or https")]
    Scheme(Box<str>),
}

impl Endpoint {
    /// Parse and validate an endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError`] when the string is not an absolute URL or
    /// uses a scheme other than `http`/`https`.
    pub fn parse(input: &str) -> Result<Self, EndpointError> {
        let url = Url::parse(input.trim())?;
        match url.scheme() {
            "http" | "https" => Ok(Self(url)),
            other => Err(EndpointError::Scheme(other.into())),
        }
    }

    #[must_use]
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self(DEFAULT_URL.clone())
    }
}

impl FromStr for Endpoint {
    type Err = EndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_endpoint_has_no_trailing_segments_added() {
        let endpoint = Endpoint::default();
        assert_eq!(endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(endpoint.as_url().scheme(), "https");
    }

    #[test]
    fn default_endpoint_passes_validation() {
        let parsed = Endpoint::parse(DEFAULT_ENDPOINT).expect("built-in endpoint");
        assert_eq!(parsed, Endpoint::default());
    }

    #[rstest]
    #[case("http://127.0.0.1:8080")]
    #[case("https://example.com/prod")]
    #[case("  https://example.com/prod  ")]
    fn accepts_http_urls(#[case] input: &str) {
        assert!(Endpoint::parse(input).is_ok());
    }

    #[rstest]
    #[case("not a url")]
    #[case("/relative/path")]
    fn rejects_unparseable_urls(#[case] input: &str) {
        assert!(matches!(Endpoint::parse(input), Err(EndpointError::Parse(_))));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = Endpoint::parse("ftp://example.com").expect_err("ftp rejected");
        assert!(matches!(err, EndpointError::Scheme(ref s) if &**s == "ftp"));
    }

    #[rstest]
    #[case(Method::Get, "GET", "GET request failed")]
    #[case(Method::Post, "POST", "POST request failed")]
    fn method_labels(#[case] method: Method, #[case] label: &str, #[case] fallback: &str) {
        assert_eq!(method.label(), label);
        assert_eq!(method.to_string(), label);
        assert_eq!(method.fallback_message(), fallback);
    }
}
