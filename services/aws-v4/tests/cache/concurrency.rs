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
use sigkey_aws_v4::SigningKeyRequest;
use std::collections::HashSet;
use tokio::sync::Barrier;

/// Holds every caller until all of them are inside the provider.
#[derive(Debug)]
struct BarrierProvider {
    barrier: Barrier,
    calls: AtomicUsize,
}

#[async_trait]
impl ProvideSigningKey for BarrierProvider {
    async fn provide_signing_key(&self, _: &str) -> sigkey_core::Result<SigningKey> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        self.barrier.wait().await;
        Ok(SigningKey::from(format!("K{n}")))
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_misses_each_call_provider() -> Result<()> {
    const CALLERS: usize = 8;

    let (cache, _) = counting_cache(50);
    let provider = Arc::new(BarrierProvider {
        barrier: Barrier::new(CALLERS),
        calls: AtomicUsize::new(0),
    });

    let mut tasks = Vec::new();
    for _ in 0..CALLERS {
        let cache = cache.clone();
        let req = SigningKeyRequest::new(SECRET, "20150830", "us-east-1", "iam")
            .with_provider(provider.clone());
        tasks.push(tokio::spawn(async move { cache.resolve(req).await }));
    }

    let mut resolved = HashSet::new();
    for task in tasks {
        resolved.insert(task.await??);
    }

    // No single flight: every caller reached the provider.
    assert_eq!(provider.calls.load(Ordering::SeqCst), CALLERS);
    assert_eq!(resolved.len(), CALLERS);

    // Last writer wins, and the key is queued once.
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.keys(), vec!["20150830_us-east-1_iam"]);
    let cached = cache
        .get("20150830_us-east-1_iam")
        .expect("key must be cached");
    assert!(resolved.contains(&cached));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_inserts_respect_capacity() -> Result<()> {
    let (cache, deriver) = counting_cache(10);

    let mut tasks = Vec::new();
    for i in 0..64 {
        let cache = cache.clone();
        tasks.push(tokio::spawn(async move {
            let req = SigningKeyRequest::new(
                SECRET,
                "20150830",
                "us-east-1",
                &format!("service-{}", i % 32),
            );
            cache.resolve(req).await
        }));
    }
    for task in tasks {
        task.await??;
    }

    let keys = cache.keys();
    assert_eq!(cache.len(), 10);
    assert_eq!(keys.len(), 10);
    assert_eq!(keys.iter().collect::<HashSet<_>>().len(), 10);
    assert!(deriver.calls() >= 32);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_hits_derive_once() -> Result<()> {
    let (cache, deriver) = counting_cache(50);
    let expected = cache.resolve_sync(SigningKeyRequest::new(
        SECRET,
        "20150830T000000Z",
        "us-east-1",
        "iam",
    ))?;

    let mut tasks = Vec::new();
    for _ in 0..16 {
        let cache = cache.clone();
        tasks.push(tokio::spawn(async move {
            cache
                .resolve(SigningKeyRequest::new(
                    SECRET,
                    "20150830T000000Z",
                    "us-east-1",
                    "iam",
                ))
                .await
        }));
    }
    for task in tasks {
        assert_eq!(task.await??, expected);
    }

    assert_eq!(deriver.calls(), 1);
    assert_eq!(expected.to_hex(), SIGNING_KEY);
    Ok(())
}
