use crate::canonical::{sorted_header_names, CanonicalRequest};
use crate::constants::*;
use crate::Credential;
use http::{header, HeaderValue};
use log::debug;
use spacesign_core::hash::{hex_hmac_sha256, hmac_sha256};
use spacesign_core::time::{format_date, format_iso8601, now, DateTime};
use spacesign_core::{Error, Result, SigningRequest};
use std::time::Duration;

/// RequestSigner that implements AWS SigV4 for S3-compatible storage.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
///
/// Signing never mutates its input and holds no state besides an optional
/// pinned time, so one signer can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

/// Time-bound scope of a single signature.
#[derive(Debug, Clone)]
struct SigningContext {
    /// `20220313T072004Z`
    timestamp: String,
    /// `20220313`
    date: String,
    /// `20220313/<region>/<service>/aws4_request`
    scope: String,
}

impl SigningContext {
    fn new(time: DateTime, cred: &Credential) -> Self {
        let date = format_date(time);
        let scope = format!("{}/{}/{}/{AWS4_REQUEST}", date, cred.region, cred.service);
        debug!("calculated scope: {scope}");

        Self {
            timestamp: format_iso8601(time),
            date,
            scope,
        }
    }

    /// `accessKey/20220313/<region>/<service>/aws4_request`
    fn credential(&self, cred: &Credential) -> String {
        format!("{}/{}", cred.access_key_id, self.scope)
    }
}

impl RequestSigner {
    /// Create a new signer that reads the clock on every call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    fn context(&self, cred: &Credential) -> Result<SigningContext> {
        cred.check()?;
        Ok(SigningContext::new(self.time.unwrap_or_else(now), cred))
    }

    /// Sign `req` for header authentication.
    ///
    /// Returns a new request carrying `host`, `x-amz-date`,
    /// `x-amz-content-sha256` (only when the request has a payload hash) and
    /// `authorization`. `req` itself is left untouched.
    pub fn sign_headers(&self, req: &SigningRequest, cred: &Credential) -> Result<SigningRequest> {
        let ctx = self.context(cred)?;
        let mut signed = req.clone();

        insert_host(&mut signed)?;
        signed
            .headers
            .insert(X_AMZ_DATE, HeaderValue::from_str(&ctx.timestamp)?);
        if let Some(hash) = &req.content_sha256 {
            signed
                .headers
                .insert(X_AMZ_CONTENT_SHA_256, HeaderValue::from_str(hash)?);
        }

        let creq = CanonicalRequest::build(&signed, req.content_sha256.as_deref())?;
        let signature = calculate_signature(&ctx, cred, &creq);

        let mut authorization = HeaderValue::from_str(&format!(
            "{ALGORITHM} Credential={}, SignedHeaders={}, Signature={}",
            ctx.credential(cred),
            creq.signed_headers,
            signature
        ))?;
        authorization.set_sensitive(true);
        signed.headers.insert(header::AUTHORIZATION, authorization);

        Ok(signed)
    }

    /// Sign `req` into a pre-signed url valid for `expires_in`
    /// (one day when `None`).
    ///
    /// The canonical payload is always `UNSIGNED-PAYLOAD`; a payload hash on
    /// the request only shows up as `X-Amz-Content-Sha256`.
    pub fn sign_url(
        &self,
        req: &SigningRequest,
        cred: &Credential,
        expires_in: Option<Duration>,
    ) -> Result<String> {
        let expires_in = expires_in.unwrap_or(DEFAULT_PRESIGN_EXPIRES);
        if expires_in.as_secs() == 0 || expires_in > MAX_PRESIGN_EXPIRES {
            return Err(Error::request_invalid(format!(
                "pre-signed url expiry must be between 1 and {} seconds, got {}",
                MAX_PRESIGN_EXPIRES.as_secs(),
                expires_in.as_secs()
            )));
        }

        let ctx = self.context(cred)?;
        let mut signed = req.clone();

        insert_host(&mut signed)?;
        let signed_headers = sorted_header_names(&signed.headers).join(";");

        signed.query_push(X_AMZ_ALGORITHM, ALGORITHM);
        signed.query_push(X_AMZ_CREDENTIAL, ctx.credential(cred));
        signed.query_push(X_AMZ_DATE_QUERY, ctx.timestamp.as_str());
        signed.query_push(X_AMZ_EXPIRES, expires_in.as_secs().to_string());
        signed.query_push(X_AMZ_SIGNED_HEADERS, signed_headers);
        if let Some(hash) = &req.content_sha256 {
            signed.query_push(X_AMZ_CONTENT_SHA_256_QUERY, hash.as_str());
        }

        let creq = CanonicalRequest::build(&signed, None)?;
        let signature = calculate_signature(&ctx, cred, &creq);

        let mut url = signed.url();
        url.push('&');
        url.push_str(X_AMZ_SIGNATURE);
        url.push('=');
        url.push_str(&signature);
        Ok(url)
    }
}

fn insert_host(req: &mut SigningRequest) -> Result<()> {
    if req.headers.get(header::HOST).is_none() {
        let host = HeaderValue::from_str(&req.host())?;
        req.headers.insert(header::HOST, host);
    }
    Ok(())
}

fn calculate_signature(ctx: &SigningContext, cred: &Credential, creq: &CanonicalRequest) -> String {
    // StringToSign:
    //
    // AWS4-HMAC-SHA256
    // 20220313T072004Z
    // 20220313/<region>/<service>/aws4_request
    // <hashed_canonical_request>
    let string_to_sign = format!(
        "{ALGORITHM}\n{}\n{}\n{}",
        ctx.timestamp,
        ctx.scope,
        creq.hash()
    );
    debug!("calculated string to sign: {string_to_sign}");

    let signing_key = generate_signing_key(&cred.secret_access_key, &ctx.date, cred);
    hex_hmac_sha256(&signing_key, string_to_sign.as_bytes())
}

fn generate_signing_key(secret: &str, date: &str, cred: &Credential) -> [u8; 32] {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), date.as_bytes());
    // Sign region
    let sign_region = hmac_sha256(&sign_date, cred.region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(&sign_region, cred.service.as_bytes());
    // Sign request
    hmac_sha256(&sign_service, AWS4_REQUEST.as_bytes())
}
