use crate::{Config, Credential};
use async_trait::async_trait;
use log::debug;
use spacesign_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads credentials from environment variables.
///
/// This provider looks for the following environment variables:
/// - `SPACES_REGION` or `AWS_REGION`
/// - `SPACES_ACCESS_KEY_ID` or `AWS_ACCESS_KEY_ID`
/// - `SPACES_SECRET_ACCESS_KEY` or `AWS_SECRET_ACCESS_KEY`
/// - `SPACES_SERVICE` (optional, defaults to `s3`)
#[derive(Debug, Default, Clone)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let config = Config::default().from_env(ctx);

        match (
            &config.region,
            &config.access_key_id,
            &config.secret_access_key,
        ) {
            (Some(_), Some(_), Some(_)) => config.credential().map(Some),
            _ => {
                debug!("environment does not carry a complete credential");
                Ok(None)
            }
        }
    }
}
