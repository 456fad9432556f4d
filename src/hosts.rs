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

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::common::config::AppConfig;
use crate::error::{Error, Result};

/// One storage host to poll, as listed in the configuration file.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct HostDescriptor {
    /// Display label, reported back as `server`.
    pub name: String,
    /// Address of the SSH server.
    pub host: String,
    #[serde(default = "default_ssh_port")]
    pub port: u16,
    pub user: String,
    pub password: String,
    /// ZFS dataset to run `zfs userspace` against.
    pub dataset: String,
}

fn default_ssh_port() -> u16 {
    AppConfig::SSH_PORT
}

// Keep the password out of logs.
impl fmt::Debug for HostDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostDescriptor")
            .field("name", &self.name)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("dataset", &self.dataset)
            .finish()
    }
}

/// Immutable monitor configuration, loaded once at startup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonitorConfig {
    #[serde(default)]
    pub zfs_servers: Vec<HostDescriptor>,
}

impl MonitorConfig {
    pub fn new(zfs_servers: Vec<HostDescriptor>) -> Self {
        Self { zfs_servers }
    }

    /// Read and parse a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self =
            serde_json::from_str(&contents).map_err(|source| Error::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!(
            "Loaded {} ZFS server(s) from {}",
            config.zfs_servers.len(),
            path.display()
        );
        Ok(config)
    }

    pub fn servers(&self) -> &[HostDescriptor] {
        &self.zfs_servers
    }
}
