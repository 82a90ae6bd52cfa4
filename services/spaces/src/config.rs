use std::fmt::{Debug, Formatter};

use spacesign_core::utils::Redact;
use spacesign_core::{Context, Error, Result};

use crate::constants::*;
use crate::Credential;

/// Config carries the settings a [`Client`](crate::Client) is built from.
///
/// Fields set explicitly win over values loaded by [`Config::from_env`].
#[derive(Clone, Default)]
pub struct Config {
    /// Region of the endpoint, e.g. `nyc3`.
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SPACES_REGION`], then [`AWS_REGION`]
    pub region: Option<String>,
    /// Access key id.
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SPACES_ACCESS_KEY_ID`], then [`AWS_ACCESS_KEY_ID`]
    pub access_key_id: Option<String>,
    /// Secret access key.
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SPACES_SECRET_ACCESS_KEY`], then [`AWS_SECRET_ACCESS_KEY`]
    pub secret_access_key: Option<String>,
    /// Service name in the credential scope, `s3` when unset.
    ///
    /// - env value: [`SPACES_SERVICE`]
    pub service: Option<String>,
    /// Endpoint url, `https://<region>.digitaloceanspaces.com` when unset.
    ///
    /// - env value: [`SPACES_ENDPOINT`]
    pub endpoint: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("region", &self.region)
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field(
                "secret_access_key",
                &Redact::secret(self.secret_access_key.as_deref().unwrap_or_default()),
            )
            .field("service", &self.service)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl Config {
    /// Fill unset fields from the environment of `ctx`.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        let first = |keys: &[&str]| keys.iter().find_map(|k| ctx.env_var(k));

        if self.region.is_none() {
            self.region = first(&[SPACES_REGION, AWS_REGION]);
        }
        if self.access_key_id.is_none() {
            self.access_key_id = first(&[SPACES_ACCESS_KEY_ID, AWS_ACCESS_KEY_ID]);
        }
        if self.secret_access_key.is_none() {
            self.secret_access_key = first(&[SPACES_SECRET_ACCESS_KEY, AWS_SECRET_ACCESS_KEY]);
        }
        if self.service.is_none() {
            self.service = ctx.env_var(SPACES_SERVICE);
        }
        if self.endpoint.is_none() {
            self.endpoint = ctx.env_var(SPACES_ENDPOINT);
        }

        self
    }

    /// Build the credential described by this config.
    ///
    /// Fails with `ConfigInvalid` if any of its fields is missing or empty.
    pub fn credential(&self) -> Result<Credential> {
        let required = |name: &str, v: &Option<String>| {
            v.clone()
                .ok_or_else(|| Error::config_invalid(format!("{name} is not configured")))
        };

        let cred = Credential {
            region: required("region", &self.region)?,
            access_key_id: required("access_key_id", &self.access_key_id)?,
            secret_access_key: required("secret_access_key", &self.secret_access_key)?,
            service: self
                .service
                .clone()
                .unwrap_or_else(|| DEFAULT_SERVICE.to_string()),
        };
        cred.check()?;

        Ok(cred)
    }

    /// Resolve the endpoint url, without a trailing slash.
    pub fn endpoint(&self) -> Result<String> {
        match (&self.endpoint, &self.region) {
            (Some(endpoint), _) => Ok(endpoint.trim_end_matches('/').to_string()),
            (None, Some(region)) if !region.is_empty() => {
                Ok(format!("https://{region}.digitaloceanspaces.com"))
            }
            _ => Err(Error::config_invalid(
                "neither endpoint nor region is configured",
            )),
        }
    }
}
