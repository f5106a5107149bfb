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

use bytes::Bytes;
use std::fmt::{Debug, Formatter};

/// SigningKey is the byte sequence produced by a key derivation chain.
///
/// The key is immutable once produced and cheap to clone, so a single
/// derived key can be handed to many requests at once.
///
/// `Debug` never prints the key material.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SigningKey(Bytes);

impl SigningKey {
    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the key in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the key holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hex encoded key.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("len", &self.0.len())
            .finish_non_exhaustive()
    }
}

impl AsRef<[u8]> for SigningKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Bytes> for SigningKey {
    fn from(value: Bytes) -> Self {
        SigningKey(value)
    }
}

impl From<Vec<u8>> for SigningKey {
    fn from(value: Vec<u8>) -> Self {
        SigningKey(Bytes::from(value))
    }
}

impl From<&[u8]> for SigningKey {
    fn from(value: &[u8]) -> Self {
        SigningKey(Bytes::copy_from_slice(value))
    }
}

impl From<String> for SigningKey {
    fn from(value: String) -> Self {
        SigningKey(Bytes::from(value))
    }
}

impl From<&str> for SigningKey {
    fn from(value: &str) -> Self {
        SigningKey(Bytes::copy_from_slice(value.as_bytes()))
    }
}
