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

use crate::constants::{CACHE_KEY_SEPARATOR, DATE_STAMP_LEN, SCOPE_SEPARATOR, V4_IDENTIFIER};

/// Returns the `YYYYMMDD` date stamp of `date`.
///
/// Dates that are too short, or cannot be split at the stamp boundary, are
/// returned whole.
pub fn date_stamp(date: &str) -> &str {
    date.get(..DATE_STAMP_LEN).unwrap_or(date)
}

/// Build the credential scope of a request.
///
/// Scope: "20220313/<region>/<service>/aws4_request"
pub fn build_scope(date: &str, region: &str, service: &str) -> String {
    [date_stamp(date), region, service, V4_IDENTIFIER].join(SCOPE_SEPARATOR)
}

/// Build the key a signing key is cached under.
///
/// Unlike the scope, the full date is kept: two timestamps of the same day
/// are cached separately.
pub fn cache_key(date: &str, region: &str, service: &str) -> String {
    [date, region, service].join(CACHE_KEY_SEPARATOR)
}
