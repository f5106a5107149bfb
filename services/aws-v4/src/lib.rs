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

//! AWS SigV4 signing key derivation and caching.
//!
//! The signing key of SigV4 is produced by a chain of four HMAC-SHA256 calls
//! seeded by the secret access key, the date, the region and the service.
//! The result only changes when one of these inputs changes, so
//! [`SigningKeyCache`] keeps recently derived keys around and hands them out
//! again instead of recomputing the chain for every request.
//!
//! ## Example
//!
//! ```
//! use sigkey_aws_v4::{build_scope, SigningKeyCache, SigningKeyRequest};
//!
//! # fn main() -> sigkey_core::Result<()> {
//! let cache = SigningKeyCache::new();
//! let req = SigningKeyRequest::new(
//!     "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
//!     "20150830T000000Z",
//!     "us-east-1",
//!     "iam",
//! );
//!
//! let key = cache.resolve_sync(req)?;
//! assert_eq!(
//!     key.to_hex(),
//!     "c4afb1cc5771d871763a393e44b703571b55cc28424d1a5e86da6ed3c154a4b9"
//! );
//! assert_eq!(
//!     build_scope("20150830T000000Z", "us-east-1", "iam"),
//!     "20150830/us-east-1/iam/aws4_request"
//! );
//! # Ok(())
//! # }
//! ```

mod cache;
pub use cache::SigningKeyCache;

mod config;
pub use config::Config;

mod constants;
pub use constants::DEFAULT_MAX_CACHE_ENTRIES;
pub use constants::V4_IDENTIFIER;

mod credential;
pub use credential::Credential;

mod derive;
pub use derive::generate_signing_key;
pub use derive::HmacSha256Chain;

mod resolve;
pub use resolve::SigningKeyRequest;

mod scope;
pub use scope::build_scope;
pub use scope::cache_key;
pub use scope::date_stamp;
