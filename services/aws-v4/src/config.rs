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

use crate::constants::*;
use sigkey_core::{Context, Error, Result};

/// Config for the signing key cache.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// `max_cache_entries` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_SIGNING_KEY_CACHE_SIZE`]
    /// - [`DEFAULT_MAX_CACHE_ENTRIES`] otherwise
    pub max_cache_entries: Option<usize>,
    /// `cache_enabled` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_SIGNING_KEY_CACHE`]
    /// - `true` otherwise
    ///
    /// This is the preference used by requests that do not state one.
    pub cache_enabled: Option<bool>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set max_cache_entries
    pub fn with_max_cache_entries(mut self, max_cache_entries: usize) -> Self {
        self.max_cache_entries = Some(max_cache_entries);
        self
    }

    /// Set cache_enabled
    pub fn with_cache_enabled(mut self, cache_enabled: bool) -> Self {
        self.cache_enabled = Some(cache_enabled);
        self
    }

    /// Load config from env.
    ///
    /// Fields that are already set win over the environment.
    pub fn from_env(mut self, ctx: &Context) -> Result<Self> {
        if let Some(v) = ctx.env_var(AWS_SIGNING_KEY_CACHE_SIZE) {
            if self.max_cache_entries.is_none() {
                let size = v.trim().parse::<usize>().map_err(|e| {
                    Error::config_invalid(format!(
                        "{AWS_SIGNING_KEY_CACHE_SIZE} must be a positive integer, got {v:?}"
                    ))
                    .with_source(e)
                })?;
                self.max_cache_entries = Some(size);
            }
        }
        if let Some(v) = ctx.env_var(AWS_SIGNING_KEY_CACHE) {
            if self.cache_enabled.is_none() {
                self.cache_enabled = Some(parse_switch(AWS_SIGNING_KEY_CACHE, &v)?);
            }
        }

        Ok(self)
    }
}

fn parse_switch(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(Error::config_invalid(format!(
            "{name} must be a boolean switch, got {value:?}"
        ))),
    }
}
