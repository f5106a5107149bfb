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

use crate::constants::DEFAULT_MAX_CACHE_ENTRIES;
use crate::{Config, HmacSha256Chain};
use log::debug;
use once_cell::sync::Lazy;
use sigkey_core::{DeriveSigningKey, Error, Result, SigningKey};
use std::collections::{HashMap, VecDeque};
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, Mutex, MutexGuard};

static GLOBAL: Lazy<SigningKeyCache> = Lazy::new(SigningKeyCache::new);

/// SigningKeyCache keeps recently derived signing keys.
///
/// Keys are stored under their [`cache_key`](crate::cache_key) and evicted
/// in insertion order once the cache holds more than its capacity. Reading
/// an entry does not refresh its position: the oldest inserted key always
/// goes first.
///
/// Cloning the cache is cheap and the clones share the same entries.
#[derive(Clone)]
pub struct SigningKeyCache {
    max_entries: usize,
    cache_enabled: bool,
    deriver: Arc<dyn DeriveSigningKey>,
    state: Arc<Mutex<CacheState>>,
}

/// The store and its eviction queue always change together.
///
/// Every key in `keys` is present exactly once in `queue`.
#[derive(Default)]
pub(crate) struct CacheState {
    keys: HashMap<String, SigningKey>,
    queue: VecDeque<String>,
}

impl CacheState {
    pub(crate) fn get(&self, cache_key: &str) -> Option<SigningKey> {
        self.keys.get(cache_key).cloned()
    }

    /// Insert a key and return the evicted cache key, if any.
    ///
    /// Overwriting moves the cache key to the back of the queue.
    pub(crate) fn insert(
        &mut self,
        cache_key: String,
        key: SigningKey,
        max_entries: usize,
    ) -> Option<String> {
        if self.keys.insert(cache_key.clone(), key).is_some() {
            self.queue.retain(|k| k != &cache_key);
        }
        self.queue.push_back(cache_key);

        if self.queue.len() <= max_entries {
            return None;
        }
        let oldest = self.queue.pop_front()?;
        self.keys.remove(&oldest);
        Some(oldest)
    }
}

impl Debug for SigningKeyCache {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKeyCache")
            .field("max_entries", &self.max_entries)
            .field("cache_enabled", &self.cache_enabled)
            .field("deriver", &self.deriver)
            .field("len", &self.len())
            .finish()
    }
}

impl Default for SigningKeyCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SigningKeyCache {
    /// Create a cache holding up to [`DEFAULT_MAX_CACHE_ENTRIES`] keys.
    pub fn new() -> Self {
        Self {
            max_entries: DEFAULT_MAX_CACHE_ENTRIES,
            cache_enabled: true,
            deriver: Arc::new(HmacSha256Chain),
            state: Arc::new(Mutex::new(CacheState::default())),
        }
    }

    /// Create a cache holding up to `max_entries` keys.
    ///
    /// Returns a `ConfigInvalid` error if `max_entries` is zero.
    pub fn with_capacity(max_entries: usize) -> Result<Self> {
        if max_entries == 0 {
            return Err(Error::config_invalid(
                "signing key cache capacity must be greater than zero",
            ));
        }

        Ok(Self {
            max_entries,
            ..Self::new()
        })
    }

    /// Create a cache from config.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let mut cache =
            Self::with_capacity(cfg.max_cache_entries.unwrap_or(DEFAULT_MAX_CACHE_ENTRIES))?;
        cache.cache_enabled = cfg.cache_enabled.unwrap_or(true);
        Ok(cache)
    }

    /// Replace the key deriver.
    ///
    /// This should be called before the cache is shared: clones made earlier
    /// keep the previous deriver.
    pub fn with_deriver(mut self, deriver: impl DeriveSigningKey) -> Self {
        self.deriver = Arc::new(deriver);
        self
    }

    /// The process wide cache.
    ///
    /// It is created on first use with the default capacity. Use it when one
    /// cache per process is wanted; otherwise construct and share your own.
    pub fn global() -> Self {
        GLOBAL.clone()
    }

    /// Maximum number of keys this cache holds.
    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    /// Whether requests without an explicit preference are cached.
    pub fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    /// Number of cached keys.
    pub fn len(&self) -> usize {
        self.lock().keys.len()
    }

    /// Returns `true` if no key is cached.
    pub fn is_empty(&self) -> bool {
        self.lock().keys.is_empty()
    }

    /// Returns `true` if a key is cached under `cache_key`.
    pub fn contains(&self, cache_key: &str) -> bool {
        self.lock().keys.contains_key(cache_key)
    }

    /// Get the key cached under `cache_key`.
    pub fn get(&self, cache_key: &str) -> Option<SigningKey> {
        self.lock().get(cache_key)
    }

    /// Cached keys in eviction order, oldest first.
    pub fn keys(&self) -> Vec<String> {
        self.lock().queue.iter().cloned().collect()
    }

    /// Drop every cached key.
    ///
    /// Call this after rotating secrets so that keys derived from the old
    /// secret are not handed out anymore.
    pub fn empty_cache(&self) {
        let mut state = self.lock();
        let dropped = state.keys.len();
        state.keys.clear();
        state.queue.clear();
        debug!("signing key cache emptied, {dropped} keys dropped");
    }

    pub(crate) fn deriver(&self) -> &dyn DeriveSigningKey {
        self.deriver.as_ref()
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().expect("lock poisoned")
    }

    /// Store `key` in a locked state, evicting the oldest entry if needed.
    pub(crate) fn insert_locked(
        &self,
        state: &mut CacheState,
        cache_key: String,
        key: SigningKey,
    ) {
        debug!("caching signing key for {cache_key}");
        if let Some(evicted) = state.insert(cache_key, key, self.max_entries) {
            debug!("signing key cache is full, evicted oldest key {evicted}");
        }
    }

    /// Store `key` under `cache_key`.
    pub(crate) fn insert(&self, cache_key: String, key: SigningKey) {
        let mut state = self.lock();
        self.insert_locked(&mut state, cache_key, key);
    }
}
