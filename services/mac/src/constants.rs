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

// Env values used by the MAC service.
/// Env holding the identifier of the key.
pub const RSIGN_MAC_KEY_ID: &str = "RSIGN_MAC_KEY_ID";
/// Env holding the shared key.
pub const RSIGN_MAC_KEY: &str = "RSIGN_MAC_KEY";

/// Scheme token that starts every MAC authorization header.
pub const MAC_SCHEME: &str = "MAC";

/// Delimiter between the fields of the string to sign.
pub const CANONICAL_DELIMITER: char = '\n';

/// Length in bytes of the random nonce generated by `RequestSigner`.
pub const NONCE_LENGTH: usize = 32;
