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

use std::str::FromStr;

use http::header::HOST;
use http::uri::{Authority, Scheme};
use log::debug;
use rsign_core::{Error, Result};

use crate::canonical::canonical_string;
use crate::header::AuthHeader;
use crate::signature::{EncodedSignature, HmacBase64Signature};

/// SignedRequest binds the endpoint of a request to a MAC signature.
///
/// `method`, `host`, `path` and `port` are covered by the signature: changing
/// any of them between signing and verifying makes verification fail.
///
/// The signature defaults to base64 encoded HMAC-SHA256. Use
/// [`SignedRequest::with_signature`] to pick another algorithm.
///
/// ```
/// use rsign_mac::SignedRequest;
///
/// let req = SignedRequest::new("POST", "example.com", "/path/to/resource", 8080);
/// let (_, header) = req
///     .get_signed_header("nonce", "1700000000", "key-id", b"secret")
///     .unwrap();
///
/// assert!(req.verify_signed_header(&header, b"secret"));
/// assert!(!req.verify_signed_header(&header, b"secreT"));
/// ```
#[derive(Debug, Clone)]
pub struct SignedRequest<S = HmacBase64Signature> {
    /// HTTP method, compared case-insensitively.
    pub method: String,
    /// Host, compared case-insensitively.
    pub host: String,
    /// Path of the request.
    pub path: String,
    /// Port of the request.
    pub port: u16,

    signature: S,
}

impl SignedRequest {
    /// Create a new signed request with the default signature.
    pub fn new(
        method: impl Into<String>,
        host: impl Into<String>,
        path: impl Into<String>,
        port: u16,
    ) -> Self {
        Self {
            method: method.into(),
            host: host.into(),
            path: path.into(),
            port,
            signature: HmacBase64Signature::hmac(),
        }
    }

    /// Build a signed request from `http::request::Parts`.
    ///
    /// - host is taken from the uri, or from the `Host` header for origin-form uris.
    /// - port falls back to the default port of the uri scheme, `80` without one.
    pub fn from_parts(parts: &http::request::Parts) -> Result<Self> {
        Self::from_parts_with_scheme(parts, &Scheme::HTTP)
    }

    /// Build a signed request from `http::request::Parts` received over `scheme`.
    ///
    /// Servers see origin-form uris like `/path` that carry no scheme, so the
    /// default port can't be derived from the uri. `scheme` decides it instead
    /// unless the uri has its own scheme.
    pub fn from_parts_with_scheme(
        parts: &http::request::Parts,
        scheme: &Scheme,
    ) -> Result<Self> {
        let authority = match parts.uri.authority() {
            Some(authority) => authority.clone(),
            None => {
                let host = parts.headers.get(HOST).ok_or_else(|| {
                    Error::request_invalid("request without host is invalid for signing")
                })?;
                Authority::from_str(host.to_str()?)?
            }
        };

        let port = authority
            .port_u16()
            .unwrap_or_else(|| default_port(parts.uri.scheme().unwrap_or(scheme)));
        let path = match parts.uri.path() {
            "" => "/",
            v => v,
        };

        Ok(Self::new(
            parts.method.as_str(),
            authority.host(),
            path,
            port,
        ))
    }
}

impl<S: EncodedSignature> SignedRequest<S> {
    /// Replace the signature used to sign and verify.
    pub fn with_signature<T: EncodedSignature>(self, signature: T) -> SignedRequest<T> {
        SignedRequest {
            method: self.method,
            host: self.host,
            path: self.path,
            port: self.port,
            signature,
        }
    }

    /// Sign the current request with `nonce` and `timestamp`.
    ///
    /// Returns the encoded signature.
    pub fn sign_request(
        &self,
        nonce: &str,
        timestamp: &str,
        key: impl AsRef<[u8]>,
    ) -> Result<String> {
        let string_to_sign = self.string_to_sign(nonce, timestamp)?;
        Ok(self
            .signature
            .sign_encoded(key.as_ref(), string_to_sign.as_bytes()))
    }

    /// Sign the current request and render the authorization header.
    ///
    /// Returns `(signature, header)`.
    pub fn get_signed_header(
        &self,
        nonce: &str,
        timestamp: &str,
        key_id: &str,
        key: impl AsRef<[u8]>,
    ) -> Result<(String, String)> {
        let signature = self.sign_request(nonce, timestamp, key)?;
        let header = AuthHeader::new(key_id, timestamp, nonce, signature.as_str()).to_string();

        Ok((signature, header))
    }

    /// Verify an authorization header against the current request.
    ///
    /// Returns `false` for a malformed header as well as for a wrong signature.
    pub fn verify_signed_header(&self, header: &str, key: impl AsRef<[u8]>) -> bool {
        match header.parse::<AuthHeader>() {
            Ok(h) => self.verify_request(&h.nonce, &h.ts, key, &h.mac),
            Err(err) => {
                debug!("auth header rejected: {err}");
                false
            }
        }
    }

    /// Verify `signature` against the current request signed with `nonce` and `timestamp`.
    pub fn verify_request(
        &self,
        nonce: &str,
        timestamp: &str,
        key: impl AsRef<[u8]>,
        signature: &str,
    ) -> bool {
        let string_to_sign = match self.string_to_sign(nonce, timestamp) {
            Ok(s) => s,
            Err(err) => {
                debug!("auth header rejected: {err}");
                return false;
            }
        };

        self.signature.verify(
            key.as_ref(),
            string_to_sign.as_bytes(),
            signature.as_bytes(),
        )
    }

    fn string_to_sign(&self, nonce: &str, timestamp: &str) -> Result<String> {
        canonical_string(
            timestamp,
            nonce,
            &self.method,
            &self.path,
            &self.host,
            self.port,
        )
    }
}

fn default_port(scheme: &Scheme) -> u16 {
    if scheme == &Scheme::HTTPS {
        443
    } else {
        80
    }
}
