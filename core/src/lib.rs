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

//! Core components for deriving and caching request signing keys.
//!
//! This crate provides the shared vocabulary used by the sigkey services.
//!
//! ## Overview
//!
//! - **SigningKey**: the immutable byte sequence produced by a derivation chain
//! - **Traits**: [`DeriveSigningKey`] for the derivation itself and
//!   [`ProvideSigningKey`] for callers that fetch keys from somewhere else
//! - **Context**: a container for the environment used when loading config
//!
//! ## Example
//!
//! ```
//! use async_trait::async_trait;
//! use sigkey_core::{ProvideSigningKey, Result, SigningKey};
//!
//! // A provider that asks a remote key service for the key.
//! #[derive(Debug)]
//! struct RemoteKeys;
//!
//! #[async_trait]
//! impl ProvideSigningKey for RemoteKeys {
//!     async fn provide_signing_key(&self, date: &str) -> Result<SigningKey> {
//!         Ok(SigningKey::from(format!("key-for-{date}")))
//!     }
//! }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Keyed hashing utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod utils;

mod context;
pub use context::Context;
pub use context::Env;
pub use context::NoopEnv;
pub use context::OsEnv;
pub use context::StaticEnv;

mod error;
pub use error::Error;
pub use error::ErrorKind;
pub use error::Result;

mod key;
pub use key::SigningKey;

mod api;
pub use api::{DeriveSigningKey, ProvideSigningKey, SigningCredential};
