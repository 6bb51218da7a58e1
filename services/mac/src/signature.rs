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

//! Keyed signature strategies.

use std::fmt::{self, Debug};
use std::marker::PhantomData;

use rsign_core::hash::{base64_decode, base64_encode, constant_time_eq, hmac_digest};
use sha2::digest::core_api::BlockSizeUser;
use sha2::digest::Digest;
use sha2::Sha256;

/// Signature is a keyed digest algorithm with a constant time equality check.
///
/// Implementations must be deterministic: the same key and text always give
/// the same signature.
pub trait Signature: Debug + Send + Sync {
    /// Compute the signature of `text` under `key`.
    fn sign(&self, key: &[u8], text: &[u8]) -> Vec<u8>;

    /// Check `a == b` without leaking the position of the first mismatch
    /// through timing. Only the length may short-circuit the comparison.
    fn compare(&self, a: &[u8], b: &[u8]) -> bool;

    /// Check that `signature` is the signature of `text` under `key`.
    fn verify(&self, key: &[u8], text: &[u8], signature: &[u8]) -> bool {
        let actual = self.sign(key, text);
        self.compare(signature, &actual)
    }
}

/// HMAC signature over the digest `D`, producing raw digest bytes.
pub struct HmacSignature<D = Sha256> {
    digest: PhantomData<fn() -> D>,
}

impl<D> HmacSignature<D> {
    /// Create a new HMAC signature.
    pub fn new() -> Self {
        Self {
            digest: PhantomData,
        }
    }
}

impl<D> Default for HmacSignature<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Clone for HmacSignature<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for HmacSignature<D> {}

impl<D> Debug for HmacSignature<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacSignature")
            .field("digest", &std::any::type_name::<D>())
            .finish()
    }
}

impl<D> Signature for HmacSignature<D>
where
    D: Digest + BlockSizeUser,
{
    fn sign(&self, key: &[u8], text: &[u8]) -> Vec<u8> {
        hmac_digest::<D>(key, text)
    }

    fn compare(&self, a: &[u8], b: &[u8]) -> bool {
        constant_time_eq(a, b)
    }
}

/// EncodedSignature is a signature whose output is text safe, so it can be
/// carried in a header value.
pub trait EncodedSignature: Signature {
    /// Compute the signature of `text` under `key` in its encoded form.
    fn sign_encoded(&self, key: &[u8], text: &[u8]) -> String;
}

/// Base64Signature encodes the output of another signature with standard base64.
///
/// The encoded form is a single line, so it can be carried in a header value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Signature<S> {
    inner: S,
}

impl<S: Signature> Base64Signature<S> {
    /// Wrap `inner` so that its signatures are base64 encoded.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Get the wrapped signature.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: Signature> Signature for Base64Signature<S> {
    fn sign(&self, key: &[u8], text: &[u8]) -> Vec<u8> {
        self.sign_encoded(key, text).into_bytes()
    }

    fn compare(&self, a: &[u8], b: &[u8]) -> bool {
        self.inner.compare(a, b)
    }

    /// Decode `signature` and compare it against the raw signature of the
    /// wrapped strategy.
    ///
    /// A signature that is not valid base64 never matches.
    fn verify(&self, key: &[u8], text: &[u8], signature: &[u8]) -> bool {
        let Some(decoded) = std::str::from_utf8(signature)
            .ok()
            .and_then(|s| base64_decode(s).ok())
        else {
            return false;
        };

        let actual = self.inner.sign(key, text);
        self.inner.compare(&decoded, &actual)
    }
}

impl<S: Signature> EncodedSignature for Base64Signature<S> {
    fn sign_encoded(&self, key: &[u8], text: &[u8]) -> String {
        base64_encode(&self.inner.sign(key, text))
    }
}

/// HMAC signature encoded with base64, the form carried by MAC headers.
pub type HmacBase64Signature<D = Sha256> = Base64Signature<HmacSignature<D>>;

impl<D> HmacBase64Signature<D>
where
    D: Digest + BlockSizeUser,
{
    /// Create a base64 encoded HMAC signature over the digest `D`.
    pub fn hmac() -> Self {
        Base64Signature::new(HmacSignature::new())
    }
}
