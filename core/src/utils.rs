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

//! Utility functions and types.

use std::fmt::Debug;

/// Redacts a secret by replacing all but the first and last three characters with asterisks.
///
/// - If the input has fewer than 12 characters, it is entirely redacted.
/// - If the input has 12 or more characters, only the first three and the last three are kept.
/// - Input that is not valid utf-8 is always entirely redacted.
///
/// This design is to allow users to distinguish between different redacted values but avoid
/// leaking sensitive information.
pub struct Redact<'a>(&'a [u8]);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value.as_bytes())
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for Redact<'a> {
    fn from(value: &'a [u8]) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a Vec<u8>> for Redact<'a> {
    fn from(value: &'a Vec<u8>) -> Self {
        Redact(value.as_slice())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        match value {
            None => Redact(b""),
            Some(v) => Redact(v.as_bytes()),
        }
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return f.write_str("EMPTY");
        }

        let Ok(s) = std::str::from_utf8(self.0) else {
            return f.write_str("***");
        };

        let chars: Vec<char> = s.chars().collect();
        let length = chars.len();
        if length < 12 {
            f.write_str("***")
        } else {
            for c in &chars[..3] {
                write!(f, "{c}")?;
            }
            f.write_str("***")?;
            for c in &chars[length - 3..] {
                write!(f, "{c}")?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact() {
        let cases = vec![
            ("Short", "***"),
            ("Hello World!", "Hel***ld!"),
            ("This is a longer string", "Thi***ing"),
            ("", "EMPTY"),
            ("HelloWorld", "***"),
            ("¬˚∆œ∑¬˚œ∑´¬œ∑", "¬˚∆***¬œ∑"),
        ];

        for (input, expected) in cases {
            assert_eq!(
                format!("{:?}", Redact::from(input)),
                expected,
                "Failed on input: {}",
                input
            );
        }
    }

    #[test]
    fn test_redact_bytes() {
        let key = vec![0xffu8; 40];
        assert_eq!(format!("{:?}", Redact::from(&key)), "***");
        assert_eq!(format!("{:?}", Redact::from(&b""[..])), "EMPTY");
    }
}
