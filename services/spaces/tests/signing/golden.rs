use super::{credential, signer, ENDPOINT};
use http::{header, Method};
use pretty_assertions::assert_eq;
use spacesign_core::{Result, SigningRequest};
use spacesign_spaces::CanonicalRequest;

/// `GET /` against nyc3 at 2024-01-01T00:00:00Z with only the host header.
///
/// Any change of this value means canonicalization or key derivation changed.
const GOLDEN_SIGNATURE: &str = "0c81f3333d5e8ed48d8064114dbb36d0743c8a7594f55837a98b1c952ccda11b";

#[test]
fn test_golden_header_signature() -> Result<()> {
    let req = SigningRequest::from_url(Method::GET, &format!("{ENDPOINT}/"))?;

    let signed = signer().sign_headers(&req, &credential())?;

    assert_eq!(signed.headers[header::HOST], "nyc3.digitaloceanspaces.com");
    assert_eq!(signed.headers["x-amz-date"], "20240101T000000Z");
    assert_eq!(
        signed.headers[header::AUTHORIZATION].to_str()?,
        format!(
            "AWS4-HMAC-SHA256 Credential=DO00EXAMPLEACCESSKEY/20240101/nyc3/s3/aws4_request, \
             SignedHeaders=host;x-amz-date, Signature={GOLDEN_SIGNATURE}"
        )
    );
    Ok(())
}

#[test]
fn test_golden_canonical_request() -> Result<()> {
    let req = SigningRequest::from_url(Method::GET, &format!("{ENDPOINT}/"))?
        .with_header("host", "nyc3.digitaloceanspaces.com")?
        .with_header("x-amz-date", "20240101T000000Z")?;

    let creq = CanonicalRequest::build(&req, None)?;
    assert_eq!(
        creq.to_string(),
        "GET\n/\n\nhost:nyc3.digitaloceanspaces.com\nx-amz-date:20240101T000000Z\n\nhost;x-amz-date\nUNSIGNED-PAYLOAD"
    );
    Ok(())
}

#[test]
fn test_golden_is_deterministic() -> Result<()> {
    let req = SigningRequest::from_url(Method::GET, &format!("{ENDPOINT}/"))?;

    let first = signer().sign_headers(&req, &credential())?;
    for _ in 0..8 {
        let again = signer().sign_headers(&req, &credential())?;
        assert_eq!(
            again.headers[header::AUTHORIZATION],
            first.headers[header::AUTHORIZATION]
        );
    }
    Ok(())
}
