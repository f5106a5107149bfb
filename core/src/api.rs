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

use crate::{Result, SigningKey};
use std::fmt::Debug;

/// SigningCredential is the trait used by credentials that carry secret
/// material for key derivation.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the credential is usable.
    fn is_valid(&self) -> bool;
}

impl<T: SigningCredential> SigningCredential for Option<T> {
    fn is_valid(&self) -> bool {
        let Some(cred) = self else {
            return false;
        };

        cred.is_valid()
    }
}

/// DeriveSigningKey computes a signing key from secret material and a
/// signing context.
///
/// Implementations must be deterministic: the same input always yields the
/// same key bytes, otherwise cached and fresh keys would disagree.
pub trait DeriveSigningKey: Debug + Send + Sync + 'static {
    /// Derive the signing key for `(date, region, service)`.
    fn derive_signing_key(
        &self,
        secret: &str,
        date: &str,
        region: &str,
        service: &str,
    ) -> SigningKey;
}

/// ProvideSigningKey is implemented by callers that obtain signing keys
/// from an external source instead of deriving them locally.
///
/// The returned future may stay pending for as long as the source needs.
/// No timeout is applied by the caller: a provider that never completes
/// keeps its resolve pending forever.
#[async_trait::async_trait]
pub trait ProvideSigningKey: Debug + Send + Sync + 'static {
    /// Produce the signing key for the given date.
    async fn provide_signing_key(&self, date: &str) -> Result<SigningKey>;
}
