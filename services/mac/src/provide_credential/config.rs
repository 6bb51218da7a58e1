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

use async_trait::async_trait;
use rsign_core::{Context, Error, ProvideCredential, Result};

use crate::{Config, Credential};

/// ConfigCredentialProvider loads the MAC key from a [`Config`].
///
/// Fields left unset in the config are filled from the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigCredentialProvider {
    config: Config,
}

impl ConfigCredentialProvider {
    /// Create a new ConfigCredentialProvider.
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let config = self.config.clone().from_env(ctx);

        match (config.key_id, config.key) {
            (Some(key_id), Some(key)) => Ok(Some(Credential::new(key_id, key))),
            (None, None) => Ok(None),
            (Some(_), None) => Err(Error::config_invalid("key_id is set but key is missing")),
            (None, Some(_)) => Err(Error::config_invalid("key is set but key_id is missing")),
        }
    }
}
