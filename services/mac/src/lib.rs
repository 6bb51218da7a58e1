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

//! MAC access authorization for HTTP requests.
//!
//! A client and a server share a key. The client binds the method, host,
//! path and port of a request to a nonce and a timestamp with a keyed
//! signature, and sends it as:
//!
//! ```text
//! Authorization: MAC id="<key id>", ts="<timestamp>", nonce="<nonce>", mac="<signature>"
//! ```
//!
//! The server recomputes the signature from the request it received and
//! compares both in constant time.
//!
//! ## Example
//!
//! ```no_run
//! use http::uri::Scheme;
//! use rsign_core::{Context, OsEnv, Result, Signer};
//! use rsign_mac::{verify_parts, DefaultCredentialProvider, RequestSigner};
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let signer = Signer::new(ctx, DefaultCredentialProvider::new(), RequestSigner::new());
//!
//! let (mut parts, _) = http::Request::get("https://example.com/hello")
//!     .body(())
//!     .unwrap()
//!     .into_parts();
//! signer.sign(&mut parts, None).await?;
//!
//! // On the server side, with the scheme the request was received over.
//! assert!(verify_parts(&parts, &Scheme::HTTPS, |_key_id| {
//!     std::env::var("RSIGN_MAC_KEY").ok()
//! }));
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod constants;
pub use constants::{RSIGN_MAC_KEY, RSIGN_MAC_KEY_ID};

mod signature;
pub use signature::{
    Base64Signature, EncodedSignature, HmacBase64Signature, HmacSignature, Signature,
};

mod canonical;
pub use canonical::canonical_string;

mod header;
pub use header::{parse_header_values, AuthHeader};

mod request;
pub use request::SignedRequest;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::*;

mod sign_request;
pub use sign_request::{generate_nonce, RequestSigner};

mod verify;
pub use verify::verify_parts;
