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

use std::fmt::{Debug, Formatter};

use crate::constants::*;
use rsign_core::{utils::Redact, Context};

/// Config carries all the configuration for MAC authorization.
#[derive(Clone, Default)]
pub struct Config {
    /// `key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`RSIGN_MAC_KEY_ID`]
    pub key_id: Option<String>,
    /// `key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`RSIGN_MAC_KEY`]
    pub key: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set key_id
    pub fn with_key_id(mut self, key_id: impl Into<String>) -> Self {
        self.key_id = Some(key_id.into());
        self
    }

    /// Set key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(RSIGN_MAC_KEY_ID) {
            self.key_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(RSIGN_MAC_KEY) {
            self.key.get_or_insert(v);
        }

        self
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("key_id", &self.key_id.as_ref().map(Redact::from))
            .field("key", &self.key.as_ref().map(Redact::from))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsign_core::StaticEnv;
    use std::collections::HashMap;

    fn context() -> Context {
        Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (RSIGN_MAC_KEY_ID.to_string(), "env-key-id".to_string()),
                (RSIGN_MAC_KEY.to_string(), "env-key".to_string()),
            ]),
        })
    }

    #[test]
    fn test_config_from_env() {
        let cfg = Config::new().from_env(&context());

        assert_eq!(cfg.key_id.as_deref(), Some("env-key-id"));
        assert_eq!(cfg.key.as_deref(), Some("env-key"));
    }

    #[test]
    fn test_config_fields_take_priority() {
        let cfg = Config::new().with_key("explicit-key").from_env(&context());

        assert_eq!(cfg.key_id.as_deref(), Some("env-key-id"));
        assert_eq!(cfg.key.as_deref(), Some("explicit-key"));
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let cfg = Config::new().with_key("a-very-long-shared-secret");
        assert!(!format!("{cfg:?}").contains("a-very-long-shared-secret"));
    }
}
