//! [`HttpSend`] implementation backed by [`reqwest`].
//!
//! Failures are classified into the transport kinds of
//! [`spacesign_core::ErrorKind`] so callers can tell a refused connection
//! from a broken TLS handshake or a timeout.

use std::error::Error as StdError;

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use log::debug;
use reqwest::{Client, Request};
use spacesign_core::{Error, HttpSend, Result};

/// ReqwestHttpSend sends requests with a shared [`reqwest::Client`].
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req)
            .map_err(|e| Error::request_invalid("failed to build reqwest request").with_source(e))?;
        debug!("sending {} {}", req.method(), req.url());

        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(classify_reqwest_error)?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(classify_reqwest_error)?;
        Ok(http::Response::from_parts(parts, bs))
    }
}

fn classify_reqwest_error(err: reqwest::Error) -> Error {
    let error = classify(&err, err.is_connect(), err.is_timeout());
    error.with_source(err)
}

/// Map a transport failure to an error kind.
///
/// TLS failures surface through reqwest as connect errors. The source chain
/// (which never contains the URL) is inspected for TLS wording before
/// falling back to `Connect`.
fn classify(err: &(dyn StdError + 'static), is_connect: bool, is_timeout: bool) -> Error {
    let chain = error_chain(err);

    if is_timeout {
        Error::timeout(format!("request timed out: {chain}"))
    } else if err.source().is_some_and(|e| is_tls_failure(&error_chain(e))) {
        Error::tls(format!("tls handshake failed: {chain}"))
    } else if is_connect {
        Error::connect(format!("failed to connect to endpoint: {chain}"))
    } else {
        Error::unexpected(format!("failed to send request: {chain}"))
    }
}

fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut s = err.to_string();
    let mut cur = err.source();
    while let Some(e) = cur {
        s.push_str(": ");
        s.push_str(&e.to_string());
        cur = e.source();
    }
    s
}

fn is_tls_failure(chain: &str) -> bool {
    let chain = chain.to_ascii_lowercase();
    ["tls", "ssl", "certificate", "handshake"]
        .iter()
        .any(|needle| chain.contains(needle))
}
