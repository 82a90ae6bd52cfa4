use std::time::Duration;

use bytes::Bytes;
use http::Method;
use log::{debug, warn};
use percent_encoding::utf8_percent_encode;
use spacesign_core::{Context, Error, ProvideCredential, SigningCredential, SigningRequest};

use crate::constants::AWS_URI_ENCODE_SET;
use crate::error::ResponseError;
use crate::xml::{from_document, ErrorResponse, ListAllMyBucketsResult, ListBucketResult, XmlDocument};
use crate::{Config, Credential, RequestSigner};

/// Convenience alias for client results.
pub type Result<T> = std::result::Result<T, ResponseError>;

/// Client sends signed requests to an S3-compatible endpoint.
///
/// The credential is fixed for the lifetime of the client. The transport is
/// whatever [`HttpSend`](spacesign_core::HttpSend) the context carries;
/// nothing is ever retried.
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Context,
    credential: Credential,
    signer: RequestSigner,
    endpoint: String,
}

impl Client {
    /// Create a client from `config`.
    ///
    /// Fails with a `Config` error before any network work if the
    /// credential or endpoint is incomplete.
    pub fn new(ctx: Context, config: &Config) -> Result<Self> {
        let credential = config.credential()?;
        let endpoint = config.endpoint()?;
        Ok(Self::from_credential(ctx, credential, &endpoint))
    }

    /// Create a client with the credential loaded from `provider`.
    pub async fn from_provider(
        ctx: Context,
        provider: &impl ProvideCredential<Credential = Credential>,
        config: &Config,
    ) -> Result<Self> {
        let credential = match provider.provide_credential(&ctx).await? {
            Some(cred) if cred.is_valid() => cred,
            Some(cred) => {
                return Err(Error::credential_invalid(format!(
                    "credential provider returned an incomplete credential: {cred:?}"
                ))
                .into())
            }
            None => {
                return Err(Error::config_invalid("credential provider returned no credential").into())
            }
        };

        let endpoint = Config {
            region: Some(credential.region.clone()),
            ..config.clone()
        }
        .endpoint()?;
        Ok(Self::from_credential(ctx, credential, &endpoint))
    }

    fn from_credential(ctx: Context, credential: Credential, endpoint: &str) -> Self {
        Self {
            ctx,
            credential,
            signer: RequestSigner::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// Replace the request signer, e.g. to pin the signing time.
    pub fn with_signer(mut self, signer: RequestSigner) -> Self {
        self.signer = signer;
        self
    }

    /// Endpoint url requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build a request for `path`, which may carry a query string and must
    /// already be percent encoded.
    pub fn request(&self, method: Method, path: &str) -> Result<SigningRequest> {
        let path = path.trim_start_matches('/');
        Ok(SigningRequest::from_url(
            method,
            &format!("{}/{}", self.endpoint, path),
        )?)
    }

    /// Build a request addressing `bucket` itself.
    ///
    /// Fails with a `Config` error if `bucket` is not a DNS-compatible name.
    pub fn bucket_request(&self, method: Method, bucket: &str) -> Result<SigningRequest> {
        check_bucket(bucket)?;
        self.request(method, bucket)
    }

    /// Build a request addressing `key` inside `bucket`.
    ///
    /// The key is percent encoded, `bucket` must be a DNS-compatible name.
    pub fn object_request(&self, method: Method, bucket: &str, key: &str) -> Result<SigningRequest> {
        check_bucket(bucket)?;
        let key = utf8_percent_encode(key.trim_start_matches('/'), &AWS_URI_ENCODE_SET);
        self.request(method, &format!("{bucket}/{key}"))
    }

    /// Sign `req` with headers, send it and return the response with its body
    /// decoded as text.
    ///
    /// Any non-2xx status is returned as a `Status` error carrying the
    /// response unmodified.
    pub async fn send(&self, req: &SigningRequest, body: Bytes) -> Result<http::Response<String>> {
        let signed = self.signer.sign_headers(req, &self.credential)?;
        let req = signed.into_request(body)?;
        debug!("sending signed request: {} {}", req.method(), req.uri());

        let resp = self.ctx.http_send_as_string(req).await.map_err(|err| {
            if err.is_transport_error() {
                warn!("request to {} failed before a response: {err}", self.endpoint);
            }
            err
        })?;

        let status = resp.status();
        if !status.is_success() {
            let message = match from_document::<ErrorResponse>(resp.body()) {
                Ok(e) if !e.code.is_empty() => format!(
                    "{}: {} (request id: {})",
                    e.code, e.message, e.request_id
                ),
                _ => format!("request failed with status {status}"),
            };
            warn!("request to {} failed: {message}", self.endpoint);
            return Err(ResponseError::status(resp, message));
        }

        Ok(resp)
    }

    /// Like [`Client::send`], then parse the body as the XML document `T`.
    ///
    /// A body whose root element is not `T::ROOT`, or that misses a required
    /// element, is returned as a `Parse` error carrying the whole response;
    /// no partial document is ever returned.
    pub async fn send_xml<T: XmlDocument>(&self, req: &SigningRequest, body: Bytes) -> Result<T> {
        let resp = self.send(req, body).await?;
        match from_document::<T>(resp.body()) {
            Ok(v) => Ok(v),
            Err(e) => Err(ResponseError::parse(resp, e)),
        }
    }

    /// List every bucket of the account.
    pub async fn list_buckets(&self) -> Result<ListAllMyBucketsResult> {
        let req = self.request(Method::GET, "/")?;
        self.send_xml(&req, Bytes::new()).await
    }

    /// List objects of `bucket`, optionally restricted to `prefix`.
    pub async fn list_objects(&self, bucket: &str, prefix: Option<&str>) -> Result<ListBucketResult> {
        let mut req = self.bucket_request(Method::GET, bucket)?;
        if let Some(prefix) = prefix {
            req.query_push("prefix", prefix);
        }
        self.send_xml(&req, Bytes::new()).await
    }

    /// Fetch the content of `key` in `bucket` as text.
    pub async fn get_object(&self, bucket: &str, key: &str) -> Result<String> {
        let req = self.object_request(Method::GET, bucket, key)?;
        Ok(self.send(&req, Bytes::new()).await?.into_body())
    }

    /// Build a pre-signed `GET` url for `key` in `bucket`.
    ///
    /// No request is sent; the url is valid for `expires_in`, one day when
    /// `None`.
    pub fn presign_get(&self, bucket: &str, key: &str, expires_in: Option<Duration>) -> Result<String> {
        let req = self.object_request(Method::GET, bucket, key)?;
        Ok(self.signer.sign_url(&req, &self.credential, expires_in)?)
    }
}

/// Bucket names are 3 to 63 lowercase letters, digits, `-` or `.`, starting
/// and ending with a letter or digit.
fn check_bucket(bucket: &str) -> spacesign_core::Result<()> {
    let valid = (3..=63).contains(&bucket.len())
        && bucket
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'.')
        && bucket.starts_with(|c: char| c.is_ascii_alphanumeric())
        && bucket.ends_with(|c: char| c.is_ascii_alphanumeric());

    if valid {
        Ok(())
    } else {
        Err(Error::request_invalid(format!(
            "bucket name {bucket:?} is not a valid DNS-compatible name"
        )))
    }
}
