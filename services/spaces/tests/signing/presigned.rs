use std::time::Duration;

use super::{credential, signer, ENDPOINT};
use http::Method;
use pretty_assertions::assert_eq;
use spacesign_core::{Result, SigningRequest};
use spacesign_spaces::EMPTY_STRING_SHA256;

fn query_value<'a>(url: &'a str, key: &str) -> Option<&'a str> {
    let (_, query) = url.split_once('?')?;
    query
        .split('&')
        .filter_map(|kv| kv.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

#[test]
fn test_presigned_url_defaults() -> Result<()> {
    let req = SigningRequest::from_url(Method::GET, &format!("{ENDPOINT}/bucket/photo.png"))?;

    let url = signer().sign_url(&req, &credential(), None)?;

    assert!(url.starts_with("https://nyc3.digitaloceanspaces.com/bucket/photo.png?"));
    assert_eq!(query_value(&url, "X-Amz-Algorithm"), Some("AWS4-HMAC-SHA256"));
    assert_eq!(
        query_value(&url, "X-Amz-Credential"),
        Some("DO00EXAMPLEACCESSKEY%2F20240101%2Fnyc3%2Fs3%2Faws4_request")
    );
    assert_eq!(query_value(&url, "X-Amz-Date"), Some("20240101T000000Z"));
    assert_eq!(query_value(&url, "X-Amz-Expires"), Some("86400"));
    assert_eq!(query_value(&url, "X-Amz-SignedHeaders"), Some("host"));
    assert_eq!(query_value(&url, "X-Amz-Content-Sha256"), None);
    assert_eq!(query_value(&url, "X-Amz-Signature").map(str::len), Some(64));
    assert!(url.ends_with(query_value(&url, "X-Amz-Signature").unwrap()));
    Ok(())
}

#[test]
fn test_presigned_url_keeps_caller_query() -> Result<()> {
    let req = SigningRequest::from_url(
        Method::GET,
        &format!("{ENDPOINT}/bucket/report.pdf?response-content-disposition=attachment%3B%20filename%3Dr.pdf"),
    )?;

    let url = signer().sign_url(&req, &credential(), Some(Duration::from_secs(600)))?;

    assert_eq!(
        query_value(&url, "response-content-disposition"),
        Some("attachment%3B%20filename%3Dr.pdf")
    );
    assert_eq!(query_value(&url, "X-Amz-Expires"), Some("600"));
    Ok(())
}

/// `GET /bucket/a` against nyc3 at 2024-01-01T00:00:00Z carrying the empty
/// payload hash, signed over a canonical request ending in `UNSIGNED-PAYLOAD`.
const GOLDEN_PRESIGNED_SIGNATURE: &str =
    "9f7f68d988ff72ee38a5c3c2efdcf059ef6a1c72e09455831a9b07b6e204aadf";

/// Same request, but signed over the payload hash itself.
const PAYLOAD_HASH_SIGNATURE: &str =
    "9f89191ae1a60d401b30dbd9fa805b659f0686eaff3ce5cb8021fb2dbfffdee7";

#[test]
fn test_presigned_payload_hash_is_never_signed() -> Result<()> {
    let req = SigningRequest::from_url(Method::GET, &format!("{ENDPOINT}/bucket/a"))?
        .with_content_sha256(EMPTY_STRING_SHA256);

    let url = signer().sign_url(&req, &credential(), None)?;

    assert_eq!(
        url,
        format!(
            "{ENDPOINT}/bucket/a\
             ?X-Amz-Algorithm=AWS4-HMAC-SHA256\
             &X-Amz-Content-Sha256={EMPTY_STRING_SHA256}\
             &X-Amz-Credential=DO00EXAMPLEACCESSKEY%2F20240101%2Fnyc3%2Fs3%2Faws4_request\
             &X-Amz-Date=20240101T000000Z\
             &X-Amz-Expires=86400\
             &X-Amz-SignedHeaders=host\
             &X-Amz-Signature={GOLDEN_PRESIGNED_SIGNATURE}"
        )
    );
    assert_ne!(
        query_value(&url, "X-Amz-Signature"),
        Some(PAYLOAD_HASH_SIGNATURE)
    );
    Ok(())
}

#[test]
fn test_presigning_leaves_request_untouched() -> Result<()> {
    let req = SigningRequest::from_url(Method::GET, &format!("{ENDPOINT}/bucket/a?x=1"))?
        .with_header("x-amz-meta-owner", "ops")?;
    let before = req.clone();

    let _ = signer().sign_url(&req, &credential(), None)?;

    assert_eq!(req.query, before.query);
    assert_eq!(req.headers, before.headers);
    assert_eq!(req.url(), before.url());
    Ok(())
}

#[test]
fn test_presigned_signs_caller_headers() -> Result<()> {
    let req = SigningRequest::from_url(Method::GET, &format!("{ENDPOINT}/bucket/a"))?
        .with_header("x-amz-meta-owner", "ops")?;

    let url = signer().sign_url(&req, &credential(), None)?;
    assert_eq!(
        query_value(&url, "X-Amz-SignedHeaders"),
        Some("host%3Bx-amz-meta-owner")
    );
    Ok(())
}
