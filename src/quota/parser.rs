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

use super::types::UsageRecord;

/// Properties requested from `zfs userspace`, in output column order.
pub const USERSPACE_FIELDS: [&str; 5] = ["name", "used", "quota", "objused", "objquota"];

/// Build the accounting command for a dataset.
///
/// `-H` drops the header and separates columns with a single tab,
/// `-S used` sorts by usage descending.
pub fn userspace_command(dataset: &str) -> String {
    format!(
        "zfs userspace -H -o {} -S used {dataset}",
        USERSPACE_FIELDS.join(",")
    )
}

/// Parse the tab-separated output of [`userspace_command`].
///
/// Lines that do not have exactly five fields are skipped.
pub fn parse_userspace_output(output: &str) -> Vec<UsageRecord> {
    output.trim().lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<UsageRecord> {
    let fields: Vec<&str> = line.split('\t').collect();
    match fields.as_slice() {
        [user, used, quota, objects_used, objects_quota] => Some(UsageRecord {
            user: user.to_string(),
            used: used.to_string(),
            quota: quota.to_string(),
            objects_used: objects_used.to_string(),
            objects_quota: objects_quota.to_string(),
        }),
        _ => None,
    }
}
