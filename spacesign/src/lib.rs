//! Signing S3-compatible object storage requests without effort.
//!
//! This crate re-exports [`spacesign_core`] at its root and the storage
//! signer under [`spaces`]. With the `default-context` feature (on by
//! default) it also offers a [`Context`] wired to reqwest and the process
//! environment.
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), spacesign::spaces::ResponseError> {
//! use spacesign::spaces::Config;
//!
//! let client = spacesign::default_client(Config::default())?;
//! for bucket in client.list_buckets().await?.buckets.bucket {
//!     println!("{}", bucket.name);
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use spacesign_core::*;

/// SigV4 signing and client for S3-compatible storage.
pub mod spaces {
    pub use spacesign_spaces::*;
}

#[cfg(feature = "default-context")]
mod context;
#[cfg(feature = "default-context")]
pub use context::{default_client, default_context};
