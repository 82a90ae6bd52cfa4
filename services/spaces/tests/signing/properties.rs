use std::sync::Arc;
use std::thread;

use super::{credential, signer, ENDPOINT};
use http::{header, Method};
use pretty_assertions::assert_eq;
use spacesign_core::{Result, SigningRequest};
use spacesign_spaces::collapse_whitespace;
use test_case::test_case;

fn signature_of(req: &SigningRequest) -> Result<String> {
    let signed = signer().sign_headers(req, &credential())?;
    let auth = signed.headers[header::AUTHORIZATION].to_str()?;
    let (_, sig) = auth
        .rsplit_once("Signature=")
        .expect("authorization must carry a signature");
    Ok(sig.to_string())
}

fn base() -> Result<SigningRequest> {
    SigningRequest::from_url(
        Method::GET,
        &format!("{ENDPOINT}/bucket/key.txt?versionId=1"),
    )?
    .with_header("x-amz-meta-owner", "ops")
}

#[test]
fn test_signature_is_lower_hex() -> Result<()> {
    let sig = signature_of(&base()?)?;
    assert_eq!(sig.len(), 64);
    assert!(sig.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    Ok(())
}

#[test_case(|r: SigningRequest| r.with_header("x-amz-meta-owner", "dev") ; "header value")]
#[test_case(|r: SigningRequest| r.with_header("x-amz-meta-extra", "1") ; "extra header")]
#[test_case(|mut r: SigningRequest| { r.query_push("versionId", "2"); Ok(r) } ; "query param")]
#[test_case(|mut r: SigningRequest| { r.method = Method::HEAD; Ok(r) } ; "method")]
#[test_case(|mut r: SigningRequest| { r.path = "/bucket/other.txt".to_string(); Ok(r) } ; "path")]
#[test_case(|r: SigningRequest| Ok(r.with_payload(b"body")) ; "payload")]
fn test_signature_is_sensitive(change: fn(SigningRequest) -> Result<SigningRequest>) {
    let req = base().expect("request must be valid");
    let original = signature_of(&req).expect("signing must succeed");

    let changed = change(req).expect("change must apply");
    let changed = signature_of(&changed).expect("signing must succeed");

    assert_ne!(original, changed);
}

#[test]
fn test_input_order_does_not_matter() -> Result<()> {
    let a = SigningRequest::from_url(Method::GET, &format!("{ENDPOINT}/b?list-type=2&prefix=a&delimiter=%2F"))?
        .with_header("x-amz-meta-b", "2")?
        .with_header("x-amz-meta-a", "1")?;
    let b = SigningRequest::from_url(Method::GET, &format!("{ENDPOINT}/b?delimiter=%2F&list-type=2&prefix=a"))?
        .with_header("X-Amz-Meta-A", "1")?
        .with_header("x-amz-meta-b", "2")?;

    assert_eq!(signature_of(&a)?, signature_of(&b)?);
    Ok(())
}

#[test]
fn test_header_whitespace_is_normalized() -> Result<()> {
    let tight = base()?.with_header("x-amz-meta-note", "a b c")?;
    let loose = base()?.with_header("x-amz-meta-note", "  a   b     c ")?;

    assert_eq!(signature_of(&tight)?, signature_of(&loose)?);
    Ok(())
}

#[test]
fn test_collapse_is_idempotent() {
    for input in ["a b", "a   b", "  a    b  c  ", "x"] {
        let once = collapse_whitespace(input);
        assert_eq!(collapse_whitespace(&once), once);
        assert!(!once.contains("  "), "{once:?}");
    }
}

#[test]
fn test_concurrent_signing() -> Result<()> {
    let signer = Arc::new(signer());
    let cred = Arc::new(credential());
    let req = Arc::new(base()?);
    let expected = signature_of(&req)?;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let (signer, cred, req) = (signer.clone(), cred.clone(), req.clone());
            thread::spawn(move || signer.sign_headers(&req, &cred))
        })
        .collect();

    for handle in handles {
        let signed = handle.join().expect("thread must not panic")?;
        let auth = signed.headers[header::AUTHORIZATION].to_str()?.to_string();
        assert!(auth.ends_with(&expected), "{auth}");
    }
    Ok(())
}
