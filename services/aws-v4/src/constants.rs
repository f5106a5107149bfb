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

/// Prefix prepended to the secret access key before the first HMAC step.
pub const SECRET_PREFIX: &str = "AWS4";
/// Terminal identifier of a SigV4 scope and of the derivation chain.
pub const V4_IDENTIFIER: &str = "aws4_request";

pub const SCOPE_SEPARATOR: &str = "/";
pub const CACHE_KEY_SEPARATOR: &str = "_";

/// Length of the `YYYYMMDD` date stamp.
pub const DATE_STAMP_LEN: usize = 8;

/// Default number of signing keys kept by a cache.
pub const DEFAULT_MAX_CACHE_ENTRIES: usize = 50;

// Env values used to configure the signing key cache.
pub const AWS_SIGNING_KEY_CACHE_SIZE: &str = "AWS_SIGNING_KEY_CACHE_SIZE";
pub const AWS_SIGNING_KEY_CACHE: &str = "AWS_SIGNING_KEY_CACHE";
