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

use crate::constants::{SECRET_PREFIX, V4_IDENTIFIER};
use crate::scope::date_stamp;
use sigkey_core::hash::hmac_sha256;
use sigkey_core::{DeriveSigningKey, SigningKey};

/// Generate the SigV4 signing key.
///
/// - [Derive a signing key for SigV4](https://docs.aws.amazon.com/IAM/latest/UserGuide/reference_sigv-create-signed-request.html#derive-signing-key)
///
/// Only the `YYYYMMDD` stamp of `date` enters the chain, so passing a full
/// `20150830T123600Z` timestamp yields the same key as `20150830`. Callers
/// that hash `date` verbatim get a different key for anything longer than
/// the stamp; pass the stamp alone to stay compatible with them.
pub fn generate_signing_key(secret: &str, date: &str, region: &str, service: &str) -> SigningKey {
    // Sign secret
    let secret = format!("{SECRET_PREFIX}{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), date_stamp(date).as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    let sign_request = hmac_sha256(sign_service.as_slice(), V4_IDENTIFIER.as_bytes());

    SigningKey::from(sign_request)
}

/// HmacSha256Chain derives keys with [`generate_signing_key`].
///
/// This is the deriver every [`SigningKeyCache`](crate::SigningKeyCache)
/// uses unless another one is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha256Chain;

impl DeriveSigningKey for HmacSha256Chain {
    fn derive_signing_key(
        &self,
        secret: &str,
        date: &str,
        region: &str,
        service: &str,
    ) -> SigningKey {
        generate_signing_key(secret, date, region, service)
    }
}
