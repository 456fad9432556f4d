// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::Serialize;

use crate::hosts::HostDescriptor;

/// One user's consumption on a dataset.
///
/// Values are the raw tokens printed by `zfs userspace` (e.g. `10G`, `none`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageRecord {
    pub user: String,
    pub used: String,
    pub quota: String,
    #[serde(rename = "objused")]
    pub objects_used: String,
    #[serde(rename = "objquota")]
    pub objects_quota: String,
}

/// The answer for a single host of one poll.
///
/// `error` is set only when the query failed; a host with no users and no
/// error simply has nothing to report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostResult {
    pub server: String,
    pub host: String,
    pub dataset: String,
    pub users: Vec<UsageRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HostResult {
    pub fn success(descriptor: &HostDescriptor, users: Vec<UsageRecord>) -> Self {
        Self {
            server: descriptor.name.clone(),
            host: descriptor.host.clone(),
            dataset: descriptor.dataset.clone(),
            users,
            error: None,
        }
    }

    pub fn failure(descriptor: &HostDescriptor, error: impl Into<String>) -> Self {
        Self {
            server: descriptor.name.clone(),
            host: descriptor.host.clone(),
            dataset: descriptor.dataset.clone(),
            users: Vec::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
