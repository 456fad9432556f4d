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

//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use zfs_monitor_api::hosts::HostDescriptor;
use zfs_monitor_api::remote::{CommandOutput, CommandRunner, QueryError};

pub fn descriptor(name: &str, host: &str, dataset: &str) -> HostDescriptor {
    HostDescriptor {
        name: name.to_string(),
        host: host.to_string(),
        port: 22,
        user: "monitor".to_string(),
        password: "secret".to_string(),
        dataset: dataset.to_string(),
    }
}

/// Canned per-host answers standing in for real SSH servers.
#[derive(Default)]
pub struct FakeFleet {
    hosts: HashMap<String, (Duration, Result<CommandOutput, QueryError>)>,
}

impl FakeFleet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn host(mut self, address: &str, stdout: &str, stderr: &str) -> Self {
        self.hosts.insert(
            address.to_string(),
            (Duration::ZERO, Ok(CommandOutput::new(stdout, stderr))),
        );
        self
    }

    pub fn slow_host(mut self, address: &str, delay: Duration, stdout: &str) -> Self {
        self.hosts.insert(
            address.to_string(),
            (delay, Ok(CommandOutput::new(stdout, ""))),
        );
        self
    }

    pub fn failing_host(mut self, address: &str, error: QueryError) -> Self {
        self.hosts
            .insert(address.to_string(), (Duration::ZERO, Err(error)));
        self
    }
}

#[async_trait]
impl CommandRunner for FakeFleet {
    async fn run(&self, host: &HostDescriptor, _command: &str) -> Result<CommandOutput, QueryError> {
        match self.hosts.get(&host.host) {
            Some((delay, response)) => {
                tokio::time::sleep(*delay).await;
                response.clone()
            }
            None => Err(QueryError::connection(
                &host.host,
                format!("timed out after {:?}", Duration::from_secs(5)),
            )),
        }
    }
}
