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

//! Codec for the `MAC id="…", ts="…", nonce="…", mac="…"` authorization header.

use std::collections::HashMap;
use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

use rsign_core::{utils::Redact, Error};

use crate::constants::MAC_SCHEME;

/// Values carried by a MAC authorization header.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthHeader {
    /// Identifier of the key used to sign, not the key itself.
    pub id: String,
    /// Timestamp the request was signed at.
    pub ts: String,
    /// Single use token bound into the signature.
    pub nonce: String,
    /// Encoded signature.
    pub mac: String,
}

impl AuthHeader {
    /// Create a new header from its values.
    pub fn new(
        id: impl Into<String>,
        ts: impl Into<String>,
        nonce: impl Into<String>,
        mac: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            ts: ts.into(),
            nonce: nonce.into(),
            mac: mac.into(),
        }
    }
}

impl Debug for AuthHeader {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthHeader")
            .field("id", &self.id)
            .field("ts", &self.ts)
            .field("nonce", &self.nonce)
            .field("mac", &Redact::from(&self.mac))
            .finish()
    }
}

/// Render the header value.
///
/// Values are written as is: a value containing `"` will not parse back.
impl Display for AuthHeader {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"{MAC_SCHEME} id="{}", ts="{}", nonce="{}", mac="{}""#,
            self.id, self.ts, self.nonce, self.mac
        )
    }
}

impl FromStr for AuthHeader {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((scheme, params)) = s.split_once(' ') else {
            return Err(Error::request_invalid("auth header has no scheme"));
        };
        if !scheme.eq_ignore_ascii_case(MAC_SCHEME) {
            return Err(Error::request_invalid(format!(
                "auth header scheme is not {MAC_SCHEME}"
            )));
        }

        let mut values = parse_header_values(params);
        let mut take = |key: &str| {
            values
                .remove(key)
                .ok_or_else(|| Error::request_invalid(format!("auth header misses {key}")))
        };

        Ok(Self {
            id: take("id")?,
            ts: take("ts")?,
            nonce: take("nonce")?,
            mac: take("mac")?,
        })
    }
}

/// Collect every `key="value"` pair of a header string.
///
/// Keys are runs of alphanumeric characters or `_`, values are one or more
/// characters other than `"`. When a key repeats, the last value wins.
///
/// This never fails: input without any pair yields an empty map.
pub fn parse_header_values(header: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();

    let mut rest = header;
    while let Some(idx) = rest.find("=\"") {
        let head = &rest[..idx];
        let tail = &rest[idx + 2..];
        let key = &head[head.trim_end_matches(is_key_char).len()..];

        let Some(end) = tail.find('"') else {
            break;
        };
        let value = &tail[..end];

        if key.is_empty() || value.is_empty() {
            // The closing quote may open the next value.
            rest = tail;
            continue;
        }

        values.insert(key.to_string(), value.to_string());
        rest = &tail[end + 1..];
    }

    values
}

fn is_key_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
