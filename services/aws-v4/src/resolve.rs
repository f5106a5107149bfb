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

use crate::scope::cache_key;
use crate::{Credential, SigningKeyCache};
use log::debug;
use sigkey_core::utils::Redact;
use sigkey_core::{Error, ProvideSigningKey, Result, SigningCredential, SigningKey};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// SigningKeyRequest describes the signing key a caller needs.
///
/// The key is resolved in this order:
///
/// 1. a key cached for the same `(date, region, service)`
/// 2. the key set by [`with_signing_key`](Self::with_signing_key)
/// 3. the key returned by the provider set by [`with_provider`](Self::with_provider)
/// 4. the key derived from `secret`
#[derive(Clone)]
pub struct SigningKeyRequest {
    secret: String,
    date: String,
    region: String,
    service: String,

    should_cache: Option<bool>,
    signing_key: Option<SigningKey>,
    provider: Option<Arc<dyn ProvideSigningKey>>,
}

impl Debug for SigningKeyRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKeyRequest")
            .field("secret", &Redact::from(&self.secret))
            .field("date", &self.date)
            .field("region", &self.region)
            .field("service", &self.service)
            .field("should_cache", &self.should_cache)
            .field("signing_key", &self.signing_key)
            .field("provider", &self.provider)
            .finish()
    }
}

impl SigningKeyRequest {
    /// Create a new request for the key of `(date, region, service)`.
    ///
    /// `date` is usually the request timestamp like `20150830T123600Z`.
    pub fn new(secret: &str, date: &str, region: &str, service: &str) -> Self {
        Self {
            secret: secret.to_string(),
            date: date.to_string(),
            region: region.to_string(),
            service: service.to_string(),

            should_cache: None,
            signing_key: None,
            provider: None,
        }
    }

    /// Create a new request using the secret of `cred`.
    ///
    /// Returns a `CredentialInvalid` error if `cred` is not usable.
    pub fn from_credential(
        cred: &Credential,
        date: &str,
        region: &str,
        service: &str,
    ) -> Result<Self> {
        if !cred.is_valid() {
            return Err(Error::credential_invalid(format!(
                "credential {cred:?} cannot be used to derive a signing key"
            )));
        }

        Ok(Self::new(&cred.secret_access_key, date, region, service))
    }

    /// Set the caching preference.
    ///
    /// Caching stays enabled unless this is `false`. `None` falls back to the
    /// preference of the cache.
    pub fn with_should_cache(mut self, should_cache: impl Into<Option<bool>>) -> Self {
        self.should_cache = should_cache.into();
        self
    }

    /// Use `key` as is instead of deriving one.
    pub fn with_signing_key(mut self, key: impl Into<SigningKey>) -> Self {
        self.signing_key = Some(key.into());
        self
    }

    /// Fetch the key from `provider` instead of deriving one.
    pub fn with_provider(mut self, provider: Arc<dyn ProvideSigningKey>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// The key this request is cached under.
    pub fn cache_key(&self) -> String {
        cache_key(&self.date, &self.region, &self.service)
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("date", &self.date),
            ("region", &self.region),
            ("service", &self.service),
        ] {
            if value.is_empty() {
                return Err(Error::request_invalid(format!(
                    "{name} is required to resolve a signing key"
                )));
            }
        }
        Ok(())
    }
}

/// Outcome of the part of a resolve that never waits.
enum Resolved {
    Ready(SigningKey),
    Pending {
        provider: Arc<dyn ProvideSigningKey>,
        cache_key: String,
        should_cache: bool,
    },
}

impl SigningKeyCache {
    /// Resolve the signing key of `req`.
    ///
    /// A cache hit returns at once without deriving anything or calling the
    /// provider. While a provider is pending the cache stays unlocked, so
    /// concurrent misses of the same key each call their provider and the
    /// last one to finish wins.
    pub async fn resolve(&self, req: SigningKeyRequest) -> Result<SigningKey> {
        match self.resolve_ready(&req)? {
            Resolved::Ready(key) => Ok(key),
            Resolved::Pending {
                provider,
                cache_key,
                should_cache,
            } => {
                debug!("fetching signing key for {cache_key} from provider");
                let key = provider.provide_signing_key(&req.date).await?;
                if should_cache {
                    self.insert(cache_key, key.clone());
                }
                Ok(key)
            }
        }
    }

    /// Resolve the signing key of `req` without an async runtime.
    ///
    /// Returns a `RequestInvalid` error if the key is not cached and must be
    /// fetched from a provider; use [`resolve`](Self::resolve) for those.
    pub fn resolve_sync(&self, req: SigningKeyRequest) -> Result<SigningKey> {
        match self.resolve_ready(&req)? {
            Resolved::Ready(key) => Ok(key),
            Resolved::Pending { cache_key, .. } => Err(Error::request_invalid(format!(
                "signing key for {cache_key} must be fetched from a provider, use resolve instead"
            ))),
        }
    }

    fn resolve_ready(&self, req: &SigningKeyRequest) -> Result<Resolved> {
        req.validate()?;

        let should_cache = req.should_cache.unwrap_or(self.cache_enabled());
        let cache_key = req.cache_key();

        if !should_cache {
            return match &req.provider {
                Some(provider) if req.signing_key.is_none() => Ok(Resolved::Pending {
                    provider: provider.clone(),
                    cache_key,
                    should_cache,
                }),
                _ => self.resolve_local(req).map(Resolved::Ready),
            };
        }

        // Check, derive and insert under one lock so that the queue never
        // outgrows the capacity.
        let mut state = self.lock();
        if let Some(key) = state.get(&cache_key) {
            debug!("signing key cache hit for {cache_key}");
            return Ok(Resolved::Ready(key));
        }
        debug!("signing key cache miss for {cache_key}");

        if let (None, Some(provider)) = (&req.signing_key, &req.provider) {
            return Ok(Resolved::Pending {
                provider: provider.clone(),
                cache_key,
                should_cache,
            });
        }

        let key = self.resolve_local(req)?;
        self.insert_locked(&mut state, cache_key, key.clone());
        Ok(Resolved::Ready(key))
    }

    /// Resolve a key that needs no provider: the precomputed one or a
    /// freshly derived one.
    fn resolve_local(&self, req: &SigningKeyRequest) -> Result<SigningKey> {
        if let Some(key) = &req.signing_key {
            return Ok(key.clone());
        }

        if req.secret.is_empty() {
            return Err(Error::credential_invalid(
                "secret access key is required to derive a signing key",
            ));
        }
        debug!(
            "deriving signing key for {} with secret {:?}",
            req.cache_key(),
            Redact::from(&req.secret)
        );
        Ok(self
            .deriver()
            .derive_signing_key(&req.secret, &req.date, &req.region, &req.service))
    }
}
