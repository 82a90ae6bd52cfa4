use std::fmt;

use http::{HeaderMap, StatusCode};
use spacesign_core::ErrorKind;
use thiserror::Error;

/// The kind of failure a [`ResponseError`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseErrorKind {
    /// Credentials, configuration or request were invalid; nothing was sent.
    Config,
    /// The connection to the endpoint could not be established.
    Connect,
    /// TLS negotiation with the endpoint failed.
    Tls,
    /// The endpoint did not answer in time.
    Timeout,
    /// The endpoint answered with a non-success status.
    Status,
    /// The endpoint answered with success but the body is not the expected XML.
    Parse,
    /// Anything else.
    Unexpected,
}

impl fmt::Display for ResponseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseErrorKind::Config => write!(f, "invalid configuration"),
            ResponseErrorKind::Connect => write!(f, "connection failed"),
            ResponseErrorKind::Tls => write!(f, "tls failed"),
            ResponseErrorKind::Timeout => write!(f, "timed out"),
            ResponseErrorKind::Status => write!(f, "unexpected status"),
            ResponseErrorKind::Parse => write!(f, "unparsable response"),
            ResponseErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// ResponseError is the only failure a [`Client`](crate::Client) call returns.
///
/// Failures that happen before a response exists carry status code `0`,
/// an empty reason phrase, no headers and an empty body. Failures tied to a
/// response carry its status, reason phrase, headers and raw body unmodified.
#[derive(Error, Debug)]
#[error("{kind} (status {status_code}): {message}")]
pub struct ResponseError {
    kind: ResponseErrorKind,
    message: String,
    status_code: u16,
    reason_phrase: String,
    headers: HeaderMap,
    body: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ResponseError {
    fn new(kind: ResponseErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: 0,
            reason_phrase: String::new(),
            headers: HeaderMap::new(),
            body: String::new(),
            source: None,
        }
    }

    /// Build an error from a non-success response.
    pub fn status(resp: http::Response<String>, message: impl Into<String>) -> Self {
        Self::with_response(ResponseErrorKind::Status, resp, message)
    }

    /// Build an error from a success response whose body could not be parsed.
    pub fn parse(
        resp: http::Response<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        let message = format!("failed to parse response body: {source}");
        let mut err = Self::with_response(ResponseErrorKind::Parse, resp, message);
        err.source = Some(Box::new(source));
        err
    }

    fn with_response(
        kind: ResponseErrorKind,
        resp: http::Response<String>,
        message: impl Into<String>,
    ) -> Self {
        let (parts, body) = resp.into_parts();
        Self {
            status_code: parts.status.as_u16(),
            reason_phrase: reason_phrase(parts.status),
            headers: parts.headers,
            body,
            ..Self::new(kind, message)
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> ResponseErrorKind {
        self.kind
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status code, `0` if no response was received.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Reason phrase of the status, empty if no response was received.
    pub fn reason_phrase(&self) -> &str {
        &self.reason_phrase
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw response body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Check if the endpoint rejected the request's authentication.
    ///
    /// A signature mismatch or an expired signature is reported as `403`.
    pub fn is_auth_failure(&self) -> bool {
        self.kind == ResponseErrorKind::Status && self.status_code == 403
    }
}

fn reason_phrase(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or_default().to_string()
}

impl From<spacesign_core::Error> for ResponseError {
    fn from(err: spacesign_core::Error) -> Self {
        let kind = match err.kind() {
            _ if err.is_config_error() => ResponseErrorKind::Config,
            ErrorKind::Connect => ResponseErrorKind::Connect,
            ErrorKind::Tls => ResponseErrorKind::Tls,
            ErrorKind::Timeout => ResponseErrorKind::Timeout,
            _ => ResponseErrorKind::Unexpected,
        };

        let mut e = Self::new(kind, err.message());
        e.source = Some(Box::new(err));
        e
    }
}
