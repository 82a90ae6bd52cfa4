// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::constants::DEFAULT_SERVICE;
use spacesign_core::utils::Redact;
use spacesign_core::{Error, Result, SigningCredential};
use std::fmt::{Debug, Formatter};

/// Credential is the identity used to sign requests.
///
/// It binds the keys to the region and service they are scoped to. The
/// secret never appears in `Debug` output and the type cannot be serialized.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// Region of the endpoint, e.g. `nyc3`.
    pub region: String,
    /// Access key id.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
    /// Service name inside the credential scope, `s3` for object storage.
    pub service: String,
}

impl Credential {
    /// Create a credential for the `s3` service.
    pub fn new(region: &str, access_key_id: &str, secret_access_key: &str) -> Self {
        Self {
            region: region.to_string(),
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
            service: DEFAULT_SERVICE.to_string(),
        }
    }

    /// Use another service name in the credential scope.
    pub fn with_service(mut self, service: &str) -> Self {
        self.service = service.to_string();
        self
    }

    /// Fail with `ConfigInvalid` naming the first empty field.
    pub fn check(&self) -> Result<()> {
        let fields = [
            ("region", &self.region),
            ("access_key_id", &self.access_key_id),
            ("secret_access_key", &self.secret_access_key),
            ("service", &self.service),
        ];

        match fields.iter().find(|(_, v)| v.trim().is_empty()) {
            Some((name, _)) => Err(Error::config_invalid(format!(
                "credential field {name} must not be empty"
            ))),
            None => Ok(()),
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("region", &self.region)
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::secret(&self.secret_access_key))
            .field("service", &self.service)
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        self.check().is_ok()
    }
}
