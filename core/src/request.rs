use std::str::FromStr;

use http::header::HeaderName;
use http::uri::Authority;
use http::uri::PathAndQuery;
use http::uri::Scheme;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;
use http::Uri;
use percent_encoding::percent_decode_str;
use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

use crate::hash::hex_sha256;
use crate::{Error, Result};

/// AsciiSet for [AWS UriEncode](https://docs.aws.amazon.com/AmazonS3/latest/API/sig-v4-header-based-auth.html)
/// used on query keys and values.
///
/// - URI encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
/// - Space is encoded as `%20`, never `+`.
pub static QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const X_AMZ_CONTENT_SHA_256: &str = "x-amz-content-sha256";

/// SigningRequest describes the request being signed.
///
/// It owns everything it needs so a signer can derive a new, signed request
/// from it without touching the original.
#[derive(Debug, Clone)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path, kept exactly as the caller encoded it.
    pub path: String,
    /// HTTP query parameters, form decoded.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: HeaderMap,
    /// Hex encoded SHA-256 of the payload, if the caller computed one.
    pub content_sha256: Option<String>,
}

impl SigningRequest {
    /// Build a signing request from a method and an absolute URL.
    pub fn from_url(method: Method, url: &str) -> Result<Self> {
        let uri = Uri::from_str(url)?;
        Self::from_uri(method, uri, HeaderMap::new())
    }

    /// Build a signing request from http::request::Parts.
    ///
    /// The parts are left untouched. An `x-amz-content-sha256` header set by
    /// the caller is taken as the payload hash.
    pub fn from_parts(parts: &http::request::Parts) -> Result<Self> {
        Self::from_uri(parts.method.clone(), parts.uri.clone(), parts.headers.clone())
    }

    fn from_uri(method: Method, uri: Uri, mut headers: HeaderMap) -> Result<Self> {
        let uri = uri.into_parts();
        let paq = uri
            .path_and_query
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        let content_sha256 = match headers.remove(X_AMZ_CONTENT_SHA_256) {
            Some(v) => Some(v.to_str()?.to_string()),
            None => None,
        };

        Ok(SigningRequest {
            method,
            scheme: uri.scheme.unwrap_or(Scheme::HTTPS),
            authority: uri.authority.ok_or_else(|| {
                Error::request_invalid("request without authority is invalid for signing")
            })?,
            path: match paq.path() {
                "" => "/".to_string(),
                v => v.to_string(),
            },
            query: match paq.query() {
                Some(v) => parse_query(v)?,
                None => Vec::new(),
            },
            headers,
            content_sha256,
        })
    }

    /// Insert a header, replacing any previous value.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        self.headers
            .insert(HeaderName::from_str(name)?, HeaderValue::from_str(value)?);
        Ok(self)
    }

    /// Set the precomputed hex SHA-256 of the payload.
    pub fn with_content_sha256(mut self, hash: impl Into<String>) -> Self {
        self.content_sha256 = Some(hash.into());
        self
    }

    /// Hash the payload and use it as the content SHA-256.
    pub fn with_payload(self, body: &[u8]) -> Self {
        self.with_content_sha256(hex_sha256(body))
    }

    /// Push a new query pair into query list.
    #[inline]
    pub fn query_push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.push((key.into(), value.into()));
    }

    /// Value of the `host` header as the transport will send it.
    ///
    /// The port is dropped when it is the default for the scheme, which is
    /// what HTTP clients do when they derive `Host` from the URL.
    pub fn host(&self) -> String {
        let default_port = match self.scheme.as_str() {
            "http" => Some(80),
            "https" => Some(443),
            _ => None,
        };

        match self.authority.port_u16() {
            Some(port) if Some(port) != default_port => {
                format!("{}:{}", self.authority.host(), port)
            }
            _ => self.authority.host().to_string(),
        }
    }

    /// Percent encode query pairs and sort them by encoded key, then value.
    pub fn query_encoded_sorted(&self) -> Vec<(String, String)> {
        let mut query: Vec<(String, String)> = self
            .query
            .iter()
            .map(|(k, v)| {
                (
                    utf8_percent_encode(k, &QUERY_ENCODE_SET).to_string(),
                    utf8_percent_encode(v, &QUERY_ENCODE_SET).to_string(),
                )
            })
            .collect();
        query.sort();
        query
    }

    /// Render the query as `k=v` pairs joined by `&`, encoded and sorted.
    ///
    /// ```shell
    /// [(b, 1), (a, x y)] => "a=x%20y&b=1"
    /// ```
    pub fn query_to_string(&self) -> String {
        let mut s = String::with_capacity(16);

        for (idx, (k, v)) in self.query_encoded_sorted().into_iter().enumerate() {
            if idx != 0 {
                s.push('&');
            }

            s.push_str(&k);
            s.push('=');
            s.push_str(&v);
        }

        s
    }

    /// Render the absolute URL of this request.
    pub fn url(&self) -> String {
        let query = self.query_to_string();
        if query.is_empty() {
            format!("{}://{}{}", self.scheme, self.authority, self.path)
        } else {
            format!("{}://{}{}?{}", self.scheme, self.authority, self.path, query)
        }
    }

    /// Convert into an `http::Request` with the given body.
    pub fn into_request<B>(self, body: B) -> Result<http::Request<B>> {
        let uri = Uri::from_str(&self.url())?;
        let mut req = http::Request::new(body);
        *req.method_mut() = self.method;
        *req.uri_mut() = uri;
        *req.headers_mut() = self.headers;
        Ok(req)
    }
}

/// Split a raw query into decoded pairs.
///
/// `+` decodes to a space. Components that do not decode to valid UTF-8
/// fail with `RequestInvalid` instead of being replaced lossily.
fn parse_query(query: &str) -> Result<Vec<(String, String)>> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            Ok((decode_query_component(k)?, decode_query_component(v)?))
        })
        .collect()
}

fn decode_query_component(s: &str) -> Result<String> {
    let s = s.replace('+', " ");
    percent_decode_str(&s)
        .decode_utf8()
        .map(|v| v.into_owned())
        .map_err(|e| {
            Error::request_invalid(format!("query component {s:?} is not valid utf-8"))
                .with_source(e)
        })
}
