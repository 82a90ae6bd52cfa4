//! Core components for signing S3-compatible storage requests.
//!
//! This crate provides the foundational types shared by the spacesign crates.
//!
//! ## Overview
//!
//! - **Context**: A container that holds implementations for HTTP sending and environment access
//! - **SigningRequest**: An owned, cloneable description of the request being signed
//! - **Error**: The error type every signing and loading operation returns
//!
//! ## Example
//!
//! ```
//! use spacesign_core::{Context, SigningRequest, StaticEnv};
//! use std::collections::HashMap;
//!
//! let ctx = Context::new().with_env(StaticEnv {
//!     envs: HashMap::from([("SPACES_REGION".to_string(), "nyc3".to_string())]),
//! });
//! assert_eq!(ctx.env_var("SPACES_REGION").as_deref(), Some("nyc3"));
//!
//! let req = SigningRequest::from_url(http::Method::GET, "https://nyc3.digitaloceanspaces.com/?list-type=2")
//!     .expect("url must be valid");
//! assert_eq!(req.path, "/");
//! ```
//!
//! ## Traits
//!
//! - [`HttpSend`]: For sending HTTP requests
//! - [`Env`]: For environment variable access
//! - [`ProvideCredential`]: For loading credentials from a single source
//! - [`SigningCredential`]: For validating credentials
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time manipulation utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Context;
pub use context::Env;
pub use context::HttpSend;
pub use context::NoopEnv;
pub use context::NoopHttpSend;
pub use context::OsEnv;
pub use context::StaticEnv;

mod api;
pub use api::{ProvideCredential, SigningCredential};
mod error;
pub use error::{Error, ErrorKind, Result};
mod request;
pub use request::{SigningRequest, QUERY_ENCODE_SET};
