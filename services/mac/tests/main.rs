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

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use http::header::{AUTHORIZATION, HOST};
use http::uri::Scheme;
use log::debug;
use rsign_core::time::{format_unix_timestamp, now};
use rsign_core::{Context, Signer, StaticEnv};
use rsign_mac::{
    generate_nonce, verify_parts, DefaultCredentialProvider, HmacSignature,
    RequestSigner, Signature, SignedRequest, StaticCredentialProvider, RSIGN_MAC_KEY,
    RSIGN_MAC_KEY_ID,
};

struct Fixture {
    request: SignedRequest,
    nonce: String,
    timestamp: String,
    key_id: String,
    key: String,
}

fn init_fixture() -> Fixture {
    let _ = env_logger::builder().is_test(true).try_init();

    Fixture {
        request: SignedRequest::new("POST", "example.com", "/path/to/resource", 8080),
        nonce: generate_nonce(),
        timestamp: format_unix_timestamp(now()),
        key_id: generate_nonce(),
        key: hex::encode(rand::random::<[u8; 20]>()) + &hex::encode(rand::random::<[u8; 20]>()),
    }
}

impl Fixture {
    fn auth_header(&self) -> String {
        self.request
            .get_signed_header(&self.nonce, &self.timestamp, &self.key_id, &self.key)
            .expect("signing must succeed")
            .1
    }
}

#[test]
fn test_request_valid() {
    let f = init_fixture();
    assert!(
        f.request.verify_signed_header(&f.auth_header(), &f.key),
        "a signed request header must authenticate"
    );
}

#[test]
fn test_rejects_tampered_key() {
    let f = init_fixture();
    assert!(!f
        .request
        .verify_signed_header(&f.auth_header(), &f.key[..f.key.len() - 1]));
}

#[test]
fn test_rejects_tampered_method() {
    let mut f = init_fixture();
    let header = f.auth_header();

    f.request.method = "GET".to_string();
    assert!(!f.request.verify_signed_header(&header, &f.key));
}

#[test]
fn test_rejects_tampered_path() {
    let mut f = init_fixture();
    let header = f.auth_header();

    f.request.method = "POST".to_string();
    f.request.path = "/not/path".to_string();
    assert!(!f.request.verify_signed_header(&header, &f.key));
}

#[test]
fn test_request_unicode() {
    let mut f = init_fixture();
    f.key = "¬˚∆œ∑¬˚œ∑´¬œ∑´∆˚∆ç∂√å∫∂√˚´∑ˆø".to_string();

    assert!(f.request.verify_signed_header(&f.auth_header(), &f.key));
}

#[test]
fn test_verify_signature_changes() -> Result<()> {
    let mut f = init_fixture();

    f.request.method = "POST".to_string();
    let sig1 = f.request.sign_request(&f.nonce, &f.timestamp, &f.key)?;

    f.request.method = "GET".to_string();
    let sig2 = f.request.sign_request(&f.nonce, &f.timestamp, &f.key)?;

    assert_ne!(sig1, sig2);
    Ok(())
}

#[test]
fn test_verify_from_many_threads() {
    let f = Arc::new(init_fixture());
    let header = Arc::new(f.auth_header());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let f = f.clone();
            let header = header.clone();
            std::thread::spawn(move || f.request.verify_signed_header(&header, &f.key))
        })
        .collect();

    for handle in handles {
        assert!(handle.join().expect("thread must not panic"));
    }
}

#[tokio::test]
async fn test_signer_round_trip() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let signer = Signer::new(
        Context::new(),
        StaticCredentialProvider::new("client-1", "shared-secret"),
        RequestSigner::new(),
    );

    let (mut parts, _) = http::Request::put("https://api.example.com/v1/objects/42")
        .body(())?
        .into_parts();
    signer.sign(&mut parts, None).await?;
    debug!("signed request: {:?}", parts.headers.get(AUTHORIZATION));

    let lookup = |key_id: &str| (key_id == "client-1").then_some("shared-secret");
    assert!(verify_parts(&parts, &Scheme::HTTPS, lookup));

    parts.uri = "https://api.example.com/v1/objects/43".parse()?;
    assert!(!verify_parts(&parts, &Scheme::HTTPS, lookup));

    Ok(())
}

#[tokio::test]
async fn test_signer_uses_fresh_nonce() -> Result<()> {
    let signer = Signer::new(
        Context::new(),
        StaticCredentialProvider::new("client-1", "shared-secret"),
        RequestSigner::new(),
    );

    let mut headers = Vec::new();
    for _ in 0..2 {
        let (mut parts, _) = http::Request::get("http://example.com/").body(())?.into_parts();
        signer.sign(&mut parts, None).await?;
        headers.push(parts.headers[AUTHORIZATION].to_str()?.to_string());
    }

    assert_ne!(headers[0], headers[1]);
    Ok(())
}

#[tokio::test]
async fn test_default_credential_provider_from_env() -> Result<()> {
    let ctx = Context::new().with_env(StaticEnv {
        envs: [
            (RSIGN_MAC_KEY_ID.to_string(), "env-client".to_string()),
            (RSIGN_MAC_KEY.to_string(), "env-secret".to_string()),
        ]
        .into_iter()
        .collect(),
    });
    let signer = Signer::new(ctx, DefaultCredentialProvider::new(), RequestSigner::new());

    let (mut parts, _) = http::Request::delete("http://example.com:8080/a/b")
        .body(())?
        .into_parts();
    signer.sign(&mut parts, None).await?;

    assert!(verify_parts(&parts, &Scheme::HTTP, |key_id| {
        (key_id == "env-client").then_some(b"env-secret")
    }));
    Ok(())
}

#[tokio::test]
async fn test_signer_round_trip_origin_form() -> Result<()> {
    let signer = Signer::new(
        Context::new(),
        StaticCredentialProvider::new("client-1", "shared-secret"),
        RequestSigner::new(),
    );

    let (mut parts, _) = http::Request::get("https://api.example.com/v1/objects")
        .body(())?
        .into_parts();
    signer.sign(&mut parts, None).await?;

    // The server receives `GET /v1/objects` with a `Host` header.
    let (server_parts, _) = http::Request::get("/v1/objects")
        .header(HOST, "api.example.com")
        .header(AUTHORIZATION, parts.headers[AUTHORIZATION].clone())
        .body(())?
        .into_parts();

    let lookup = |key_id: &str| (key_id == "client-1").then_some("shared-secret");
    assert!(verify_parts(&server_parts, &Scheme::HTTPS, lookup));
    assert!(!verify_parts(&server_parts, &Scheme::HTTP, lookup));

    Ok(())
}

#[tokio::test]
async fn test_signer_with_empty_key() -> Result<()> {
    let signer = Signer::new(
        Context::new(),
        StaticCredentialProvider::new("client-1", ""),
        RequestSigner::new(),
    );

    let (mut parts, _) = http::Request::get("http://example.com/").body(())?.into_parts();
    let err = signer
        .sign(&mut parts, None)
        .await
        .expect_err("an empty key must not sign");
    assert!(err.is_credential_error());
    assert!(parts.headers.get(AUTHORIZATION).is_none());
    Ok(())
}

#[tokio::test]
async fn test_signer_without_credential() -> Result<()> {
    let signer = Signer::new(
        Context::new(),
        DefaultCredentialProvider::new(),
        RequestSigner::new(),
    );

    let (mut parts, _) = http::Request::get("http://example.com/").body(())?.into_parts();
    let err = signer
        .sign(&mut parts, None)
        .await
        .expect_err("no credential is configured");
    assert!(err.is_credential_error());
    Ok(())
}

/// Average time of `rounds` comparisons of `a` against `b`.
fn sample(signature: &HmacSignature, a: &[u8], b: &[u8], rounds: u32) -> Duration {
    let start = Instant::now();
    for _ in 0..rounds {
        std::hint::black_box(signature.compare(std::hint::black_box(a), std::hint::black_box(b)));
    }
    start.elapsed() / rounds
}

// Timing is noisy on shared machines: run with `cargo test -- --ignored` on a quiet host.
#[test]
#[ignore]
fn test_compare_timing_does_not_depend_on_mismatch_position() {
    let signature = HmacSignature::<sha2::Sha256>::new();
    let expected = vec![0x5au8; 4096];

    let mut first = expected.clone();
    first[0] ^= 1;
    let mut last = expected.clone();
    last[4095] ^= 1;

    let mut ratios = Vec::new();
    for _ in 0..20 {
        let t_first = sample(&signature, &expected, &first, 2_000);
        let t_last = sample(&signature, &expected, &last, 2_000);
        ratios.push(t_first.as_secs_f64() / t_last.as_secs_f64());
    }
    ratios.sort_by(f64::total_cmp);

    let median = ratios[ratios.len() / 2];
    assert!(
        (0.8..1.25).contains(&median),
        "first/last mismatch timing ratio {median} is too far from 1"
    );
}
