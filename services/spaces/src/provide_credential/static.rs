use crate::Credential;
use async_trait::async_trait;
use spacesign_core::{Context, ProvideCredential, Result};

/// StaticCredentialProvider hands out a credential fixed at construction.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    credential: Credential,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider for the `s3` service.
    pub fn new(region: &str, access_key_id: &str, secret_access_key: &str) -> Self {
        Self {
            credential: Credential::new(region, access_key_id, secret_access_key),
        }
    }

    /// Set the service name used in the credential scope.
    pub fn with_service(mut self, service: &str) -> Self {
        self.credential = self.credential.with_service(service);
        self
    }
}

impl From<Credential> for StaticCredentialProvider {
    fn from(credential: Credential) -> Self {
        Self { credential }
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(self.credential.clone()))
    }
}
