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

//! MAC authorization builder
use std::time::Duration;

use async_trait::async_trait;
use http::header::AUTHORIZATION;
use http::HeaderValue;
use log::debug;
use rsign_core::time::{format_unix_timestamp, now, DateTime};
use rsign_core::{Context, Error, Result, SignRequest, SigningCredential};

use crate::constants::NONCE_LENGTH;
use crate::credential::Credential;
use crate::request::SignedRequest;

/// RequestSigner that implements MAC access authorization.
///
/// Every signed request carries a fresh nonce and the current timestamp.
/// Tracking used nonces and rejecting stale timestamps is left to the server.
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
    nonce: Option<String>,
}

impl RequestSigner {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Specify the nonce.
    ///
    /// # Note
    ///
    /// A nonce must never be reused, only use this function for testing.
    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _ctx: &Context,
        parts: &mut http::request::Parts,
        credential: Option<&Self::Credential>,
        expires_in: Option<Duration>,
    ) -> Result<()> {
        let k = credential.ok_or_else(|| Error::credential_invalid("missing credential"))?;
        if !k.is_valid() {
            return Err(Error::credential_invalid(
                "credential must have a non-empty key id and key",
            ));
        }
        if expires_in.is_some() {
            return Err(Error::request_invalid(
                "MAC authorization does not support query signing",
            ));
        }

        let timestamp = format_unix_timestamp(self.time.unwrap_or_else(now));
        let nonce = self.nonce.clone().unwrap_or_else(generate_nonce);

        let req = SignedRequest::from_parts(parts)?;
        let (_, header) = req.get_signed_header(&nonce, &timestamp, &k.key_id, &k.key)?;
        debug!("signed {} {} with key id {}", req.method, req.path, k.key_id);

        parts.headers.insert(AUTHORIZATION, {
            let mut value: HeaderValue = header.parse()?;
            value.set_sensitive(true);

            value
        });

        Ok(())
    }
}

/// Generate a random hex encoded nonce.
pub fn generate_nonce() -> String {
    let bytes: [u8; NONCE_LENGTH] = rand::random();
    hex::encode(bytes)
}
