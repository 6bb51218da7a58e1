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

//! Hash related utils.

use crate::Error;
use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use hmac::digest::core_api::BlockSizeUser;
use hmac::digest::Digest;
use hmac::Mac;
use hmac::SimpleHmac;
use subtle::ConstantTimeEq;

/// Base64 encode
pub fn base64_encode(content: &[u8]) -> String {
    BASE64_STANDARD.encode(content)
}

/// Base64 decode
pub fn base64_decode(content: &str) -> crate::Result<Vec<u8>> {
    BASE64_STANDARD
        .decode(content)
        .map_err(|e| Error::request_invalid("base64 decode failed").with_source(e))
}

/// HMAC over any block based digest.
///
/// HMAC accepts keys of any length: longer keys are hashed first and
/// shorter ones are padded.
pub fn hmac_digest<D>(key: &[u8], content: &[u8]) -> Vec<u8>
where
    D: Digest + BlockSizeUser,
{
    let mut h = <SimpleHmac<D> as Mac>::new_from_slice(key)
        .expect("HMAC must accept keys of any length");
    h.update(content);

    h.finalize().into_bytes().to_vec()
}

/// Compare two byte slices in constant time.
///
/// The running time depends on the lengths only, never on where the first
/// mismatching byte is. Slices of different length are never equal.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::Sha256;

    // RFC 4231, test case 2.
    const KEY: &[u8] = b"Jefe";
    const DATA: &[u8] = b"what do ya want for nothing?";

    #[test]
    fn test_hmac_sha256() {
        assert_eq!(
            hex::encode(hmac_digest::<Sha256>(KEY, DATA)),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
        assert_eq!(
            base64_encode(&hmac_digest::<Sha256>(KEY, DATA)),
            "W9zBRr9gdU5qBCQmCJV1x1oAPwidJzmDnexYuWTsOEM="
        );
    }

    #[test]
    fn test_hmac_sha1() {
        assert_eq!(
            hex::encode(hmac_digest::<sha1::Sha1>(KEY, DATA)),
            "effcdf6ae5eb2fa2d27416d5f184df9c259a7c79"
        );
    }

    #[test]
    fn test_hmac_accepts_any_key_length() {
        assert_eq!(hmac_digest::<Sha256>(b"", DATA).len(), 32);
        assert_eq!(hmac_digest::<Sha256>(&[7u8; 200], DATA).len(), 32);
    }

    #[test]
    fn test_base64_decode() {
        assert_eq!(base64_decode("aGVsbG8=").unwrap(), b"hello");
        assert!(base64_decode("not base64!").is_err());
        assert!(base64_decode("aGVsbG8=\n").is_err());
    }

    #[test]
    fn test_constant_time_eq() {
        let cases: [(&[u8], &[u8], bool); 6] = [
            (b"", b"", true),
            (b"abc", b"abc", true),
            (b"abc", b"abd", false),
            (b"abc", b"xbc", false),
            (b"abc", b"ab", false),
            (b"ab", b"abc", false),
        ];

        for (a, b, expected) in cases {
            assert_eq!(constant_time_eq(a, b), expected, "{a:?} vs {b:?}");
        }
    }
}
