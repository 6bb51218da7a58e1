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

use log::debug;
use rsign_core::{Error, Result};

use crate::constants::CANONICAL_DELIMITER;

/// Construct the string to sign.
///
/// ## Format
///
/// ```text
/// timestamp + "\n" +
/// nonce + "\n" +
/// UPPERCASE(method) + "\n" +
/// path + "\n" +
/// lowercase(host) + "\n" +
/// port
/// ```
///
/// No field may contain the delimiter, otherwise two different requests
/// could share the same string to sign.
pub fn canonical_string(
    timestamp: &str,
    nonce: &str,
    method: &str,
    path: &str,
    host: &str,
    port: u16,
) -> Result<String> {
    for (name, value) in [
        ("timestamp", timestamp),
        ("nonce", nonce),
        ("method", method),
        ("path", path),
        ("host", host),
    ] {
        if value.contains(CANONICAL_DELIMITER) {
            return Err(Error::request_invalid(format!(
                "{name} must not contain a line break"
            )));
        }
    }

    let method = method.to_uppercase();
    let host = host.to_lowercase();
    let port = port.to_string();
    let fields: [&str; 6] = [timestamp, nonce, &method, path, &host, &port];
    let s = fields.join("\n");

    debug!("string to sign: {}", &s);
    Ok(s)
}
