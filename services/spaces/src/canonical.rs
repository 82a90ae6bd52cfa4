//! Canonical request construction for SigV4.
//!
//! - [Create a canonical request](https://docs.aws.amazon.com/IAM/latest/UserGuide/create-signed-request.html#create-canonical-request)

use std::fmt;
use std::fmt::Write;

use http::HeaderMap;
use log::debug;
use spacesign_core::hash::hex_sha256;
use spacesign_core::{Result, SigningRequest};

use crate::constants::UNSIGNED_PAYLOAD;

/// CanonicalRequest is the deterministic rendering of a request that gets hashed
/// into the string to sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    /// Upper-case HTTP method.
    pub method: String,
    /// Request path as the caller encoded it.
    pub uri: String,
    /// Encoded, sorted query string.
    pub query: String,
    /// `name:value\n` lines sorted by name.
    pub headers: String,
    /// Sorted header names joined by `;`.
    pub signed_headers: String,
    /// Hex SHA-256 of the payload or `UNSIGNED-PAYLOAD`.
    pub payload_hash: String,
}

impl CanonicalRequest {
    /// Canonicalize `req`, using `payload_hash` when given and
    /// `UNSIGNED-PAYLOAD` otherwise.
    ///
    /// Every header present on `req` is signed.
    pub fn build(req: &SigningRequest, payload_hash: Option<&str>) -> Result<Self> {
        let names = sorted_header_names(&req.headers);

        let mut headers = String::with_capacity(names.len() * 32);
        for name in &names {
            let mut values = Vec::new();
            for value in req.headers.get_all(*name) {
                values.push(collapse_whitespace(value.to_str()?));
            }
            writeln!(headers, "{}:{}", name, values.join(","))?;
        }

        Ok(Self {
            method: req.method.as_str().to_string(),
            uri: req.path.clone(),
            query: req.query_to_string(),
            headers,
            signed_headers: names.join(";"),
            payload_hash: payload_hash.unwrap_or(UNSIGNED_PAYLOAD).to_string(),
        })
    }

    /// Hex SHA-256 of the canonical request.
    pub fn hash(&self) -> String {
        let creq = self.to_string();
        debug!("calculated canonical request: {creq}");
        hex_sha256(creq.as_bytes())
    }
}

impl fmt::Display for CanonicalRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.method)?;
        writeln!(f, "{}", self.uri)?;
        writeln!(f, "{}", self.query)?;
        // Each header line carries its own newline, so the block is
        // followed by an empty line.
        writeln!(f, "{}", self.headers)?;
        writeln!(f, "{}", self.signed_headers)?;
        write!(f, "{}", self.payload_hash)
    }
}

/// Header names of `headers`, sorted.
///
/// `HeaderMap` stores names lower-cased, so no further folding is needed.
pub fn sorted_header_names(headers: &HeaderMap) -> Vec<&str> {
    let mut names: Vec<&str> = headers.keys().map(|k| k.as_str()).collect();
    names.sort_unstable();
    names
}

/// Trim a header value and collapse every run of spaces into one space.
///
/// The result is the fixed point of repeatedly replacing two spaces with
/// one, so calling it again is a no-op.
pub fn collapse_whitespace(value: &str) -> String {
    let mut s = String::with_capacity(value.len());
    let mut prev_space = false;

    for c in value.trim().chars() {
        if c == ' ' {
            if !prev_space {
                s.push(c);
            }
            prev_space = true;
        } else {
            s.push(c);
            prev_space = false;
        }
    }

    s
}
