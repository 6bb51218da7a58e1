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

use http::header::AUTHORIZATION;
use http::uri::Scheme;
use log::debug;

use crate::header::AuthHeader;
use crate::request::SignedRequest;

/// Verify the MAC authorization header of an incoming request.
///
/// `scheme` is the scheme the request was received over. It decides the
/// default port when neither the uri nor the `Host` header carry one.
/// `lookup` resolves the key id found in the header into the shared key.
/// Returns `false` when the header is missing or malformed, the key id is
/// unknown, or the mac does not match the request.
///
/// Checking that the nonce is fresh and the timestamp is recent is left to
/// the caller.
///
/// ```
/// use http::uri::Scheme;
/// use rsign_mac::verify_parts;
///
/// let (parts, _) = http::Request::get("/hello")
///     .header(http::header::HOST, "example.com")
///     .body(())
///     .unwrap()
///     .into_parts();
///
/// assert!(!verify_parts(&parts, &Scheme::HTTPS, |_| Some(b"secret")));
/// ```
pub fn verify_parts<F, K>(parts: &http::request::Parts, scheme: &Scheme, lookup: F) -> bool
where
    F: FnOnce(&str) -> Option<K>,
    K: AsRef<[u8]>,
{
    let Some(value) = parts.headers.get(AUTHORIZATION) else {
        debug!("request has no authorization header");
        return false;
    };
    let Ok(value) = value.to_str() else {
        debug!("authorization header is not visible ascii");
        return false;
    };

    let header: AuthHeader = match value.parse() {
        Ok(header) => header,
        Err(err) => {
            debug!("auth header rejected: {err}");
            return false;
        }
    };

    let Some(key) = lookup(&header.id) else {
        debug!("no key found for key id {}", header.id);
        return false;
    };

    let req = match SignedRequest::from_parts_with_scheme(parts, scheme) {
        Ok(req) => req,
        Err(err) => {
            debug!("request can't be verified: {err}");
            return false;
        }
    };

    req.verify_request(&header.nonce, &header.ts, key, &header.mac)
}
