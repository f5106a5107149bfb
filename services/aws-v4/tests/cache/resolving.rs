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

use crate::*;
use anyhow::Result;
use pretty_assertions::assert_eq;
use sigkey_aws_v4::{build_scope, cache_key, SigningKeyRequest};
use sigkey_core::ErrorKind;
use std::time::Duration;

fn iam_request() -> SigningKeyRequest {
    SigningKeyRequest::new(SECRET, "20150830T000000Z", "us-east-1", "iam")
}

#[test]
fn test_known_signing_key_vector() -> Result<()> {
    let (cache, _) = counting_cache(50);
    let key = cache.resolve_sync(iam_request())?;

    assert_eq!(key.to_hex(), SIGNING_KEY);
    assert_eq!(
        build_scope("20150830T000000Z", "us-east-1", "iam"),
        "20150830/us-east-1/iam/aws4_request"
    );
    Ok(())
}

#[test]
fn test_slash_secret_timestamp_key() -> Result<()> {
    let (cache, _) = counting_cache(50);
    let key = cache.resolve_sync(SigningKeyRequest::new(
        "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY",
        "20150830T000000Z",
        "us-east-1",
        "iam",
    ))?;

    assert_eq!(
        key.to_hex(),
        "2c94c0cf5378ada6887f09bb697df8fc0affdb34ba1cdd5bda32b664bd55b73c"
    );
    assert_ne!(key.to_hex(), SIGNING_KEY);
    Ok(())
}

#[tokio::test]
async fn test_cached_key_is_derived_once() -> Result<()> {
    let (cache, deriver) = counting_cache(50);

    let first = cache.resolve(iam_request()).await?;
    let second = cache.resolve(iam_request()).await?;

    assert_eq!(first, second);
    assert_eq!(deriver.calls(), 1);
    assert!(cache.contains(&cache_key("20150830T000000Z", "us-east-1", "iam")));
    Ok(())
}

#[tokio::test]
async fn test_disabled_cache_derives_every_time() -> Result<()> {
    let (cache, deriver) = counting_cache(50);

    cache.resolve(iam_request().with_should_cache(false)).await?;
    cache.resolve(iam_request().with_should_cache(false)).await?;

    assert_eq!(deriver.calls(), 2);
    assert!(cache.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_timestamps_of_same_day_are_cached_separately() -> Result<()> {
    let (cache, deriver) = counting_cache(50);

    let morning = cache
        .resolve(SigningKeyRequest::new(
            SECRET,
            "20150830T080000Z",
            "us-east-1",
            "iam",
        ))
        .await?;
    let evening = cache
        .resolve(SigningKeyRequest::new(
            SECRET,
            "20150830T200000Z",
            "us-east-1",
            "iam",
        ))
        .await?;

    assert_eq!(morning, evening);
    assert_eq!(deriver.calls(), 2);
    assert_eq!(cache.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_precomputed_key_bypasses_derivation() -> Result<()> {
    let (cache, deriver) = counting_cache(50);

    let key = cache
        .resolve(iam_request().with_signing_key(vec![1u8, 2, 3]))
        .await?;
    assert_eq!(key.as_bytes(), &[1, 2, 3]);

    // A later lookup without the key gets the cached one.
    let key = cache.resolve(iam_request()).await?;
    assert_eq!(key.as_bytes(), &[1, 2, 3]);
    assert_eq!(deriver.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_precomputed_key_wins_over_provider() -> Result<()> {
    let (cache, deriver) = counting_cache(50);
    let provider = StaticProvider::new("K123");

    let key = cache
        .resolve(
            iam_request()
                .with_signing_key("precomputed")
                .with_provider(provider.clone()),
        )
        .await?;

    assert_eq!(key, SigningKey::from("precomputed"));
    assert_eq!(provider.calls(), 0);
    assert_eq!(deriver.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_cache_hit_wins_over_precomputed_key() -> Result<()> {
    let (cache, _) = counting_cache(50);
    let derived = cache.resolve(iam_request()).await?;

    let key = cache
        .resolve(iam_request().with_signing_key("precomputed"))
        .await?;
    assert_eq!(key, derived);

    let key = cache
        .resolve(
            iam_request()
                .with_signing_key("precomputed")
                .with_should_cache(false),
        )
        .await?;
    assert_eq!(key, SigningKey::from("precomputed"));
    Ok(())
}

#[tokio::test]
async fn test_provider_key_is_cached() -> Result<()> {
    let (cache, deriver) = counting_cache(50);
    let provider = StaticProvider::new("K123");

    let key = cache
        .resolve(iam_request().with_provider(provider.clone()))
        .await?;
    assert_eq!(key, SigningKey::from("K123"));

    let key = cache
        .resolve(iam_request().with_provider(provider.clone()))
        .await?;
    assert_eq!(key, SigningKey::from("K123"));

    assert_eq!(provider.calls(), 1);
    assert_eq!(provider.dates(), vec!["20150830T000000Z"]);
    assert_eq!(deriver.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_provider_without_cache_is_called_every_time() -> Result<()> {
    let (cache, _) = counting_cache(50);
    let provider = StaticProvider::new("K123");
    let req = iam_request()
        .with_provider(provider.clone())
        .with_should_cache(false);

    cache.resolve(req.clone()).await?;
    cache.resolve(req).await?;

    assert_eq!(provider.calls(), 2);
    assert!(cache.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_provider_error_is_not_cached() -> Result<()> {
    let (cache, deriver) = counting_cache(50);

    let err = cache
        .resolve(iam_request().with_provider(Arc::new(FailingProvider)))
        .await
        .expect_err("provider error must be returned");

    assert_eq!(err.kind(), ErrorKind::Unexpected);
    assert_eq!(err.to_string(), "key service unavailable");
    assert!(cache.is_empty());
    assert_eq!(deriver.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_pending_provider_never_writes_cache() -> Result<()> {
    let (cache, _) = counting_cache(50);

    let resolved = tokio::time::timeout(
        Duration::from_millis(50),
        cache.resolve(iam_request().with_provider(Arc::new(PendingProvider))),
    )
    .await;

    assert!(resolved.is_err(), "pending provider must keep resolve pending");
    assert!(cache.is_empty());
    Ok(())
}

#[test]
fn test_resolve_sync_refuses_provider() -> Result<()> {
    let (cache, _) = counting_cache(50);
    let provider = StaticProvider::new("K123");

    let err = cache
        .resolve_sync(iam_request().with_provider(provider.clone()))
        .expect_err("provider needs async resolve");
    assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    assert_eq!(provider.calls(), 0);

    // Once cached, sync resolution is fine even with a provider attached.
    cache.resolve_sync(iam_request().with_signing_key("K123"))?;
    let key = cache.resolve_sync(iam_request().with_provider(provider.clone()))?;
    assert_eq!(key, SigningKey::from("K123"));
    assert_eq!(provider.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_empty_cache_forces_derivation() -> Result<()> {
    let (cache, deriver) = counting_cache(50);

    let before = cache.resolve(iam_request()).await?;
    cache.empty_cache();
    assert!(cache.is_empty());

    let after = cache.resolve(iam_request()).await?;
    assert_eq!(before, after);
    assert_eq!(deriver.calls(), 2);
    Ok(())
}

#[tokio::test]
async fn test_rotated_secret_needs_empty_cache() -> Result<()> {
    let (cache, _) = counting_cache(50);
    let old = cache.resolve(iam_request()).await?;

    let rotated = SigningKeyRequest::new("rotated-secret", "20150830T000000Z", "us-east-1", "iam");
    assert_eq!(cache.resolve(rotated.clone()).await?, old);

    cache.empty_cache();
    assert_ne!(cache.resolve(rotated).await?, old);
    Ok(())
}
