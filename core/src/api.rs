use crate::{Context, Result};
use std::fmt::Debug;

/// SigningCredential is the trait implemented by every credential a signer accepts.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the credential is complete enough to sign with.
    fn is_valid(&self) -> bool;
}

/// ProvideCredential loads a credential from exactly one source.
///
/// Providers are never chained. A provider returns `Ok(None)` when its
/// source has nothing to offer.
#[async_trait::async_trait]
pub trait ProvideCredential: Debug + Send + Sync + Unpin + 'static {
    /// Credential returned by this provider.
    type Credential: SigningCredential;

    /// Load the credential from the given context.
    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>>;
}
