//! SigV4 signing and a thin client for S3-compatible object storage.
//!
//! ```
//! use http::Method;
//! use spacesign_core::SigningRequest;
//! use spacesign_spaces::{Credential, RequestSigner};
//!
//! # fn main() -> spacesign_core::Result<()> {
//! let cred = Credential::new("nyc3", "DO00EXAMPLEACCESSKEY", "secret");
//! let req = SigningRequest::from_url(Method::GET, "https://nyc3.digitaloceanspaces.com/bucket/key")?;
//!
//! let signed = RequestSigner::new().sign_headers(&req, &cred)?;
//! assert!(signed.headers.contains_key(http::header::AUTHORIZATION));
//!
//! let url = RequestSigner::new().sign_url(&req, &cred, None)?;
//! assert!(url.contains("X-Amz-Signature="));
//! # Ok(())
//! # }
//! ```

mod canonical;
pub use canonical::{collapse_whitespace, CanonicalRequest};

mod client;
pub use client::Client;

mod config;
pub use config::Config;

mod constants;
pub use constants::{DEFAULT_PRESIGN_EXPIRES, EMPTY_STRING_SHA256, UNSIGNED_PAYLOAD};

mod credential;
pub use credential::Credential;

mod error;
pub use error::{ResponseError, ResponseErrorKind};

mod provide_credential;
pub use provide_credential::*;

mod sign_request;
pub use sign_request::RequestSigner;

pub mod xml;
