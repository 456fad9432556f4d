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

use std::time::Duration;

/// Application configuration constants
pub struct AppConfig;

impl AppConfig {
    // API Server
    pub const DEFAULT_BIND_ADDRESS: &'static str = "0.0.0.0";
    pub const DEFAULT_API_PORT: u16 = 19998;
    pub const DEFAULT_CONFIG_PATH: &'static str = "config.json";
    pub const USAGE_ROUTE: &'static str = "/user_disk_usage";

    // Remote Query
    pub const SSH_PORT: u16 = 22;
    pub const CONNECTION_TIMEOUT_SECS: u64 = 5;
    pub const COMMAND_TIMEOUT_SECS: u64 = 5;
    pub const MAX_CONCURRENT_CONNECTIONS: usize = 64;

    // Logging
    pub const DEFAULT_LOG_FILTER: &'static str = "zfs_monitor_api=info,tower_http=debug";
}

/// Environment-specific configuration
pub struct EnvConfig;

impl EnvConfig {
    /// One permit per host, capped so a very long host list cannot open
    /// an unbounded number of SSH sessions at once.
    pub fn max_concurrent_connections(total_hosts: usize) -> usize {
        total_hosts.clamp(1, AppConfig::MAX_CONCURRENT_CONNECTIONS)
    }

    pub fn connection_timeout() -> Duration {
        Duration::from_secs(AppConfig::CONNECTION_TIMEOUT_SECS)
    }

    pub fn command_timeout() -> Duration {
        Duration::from_secs(AppConfig::COMMAND_TIMEOUT_SECS)
    }
}
