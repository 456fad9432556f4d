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

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::hosts::HostDescriptor;
use crate::remote::{CommandOutput, CommandRunner, QueryError};

pub fn descriptor(name: &str, host: &str, dataset: &str) -> HostDescriptor {
    HostDescriptor {
        name: name.to_string(),
        host: host.to_string(),
        port: 22,
        user: "root".to_string(),
        password: "secret".to_string(),
        dataset: dataset.to_string(),
    }
}

struct Script {
    delay: Duration,
    response: Result<CommandOutput, QueryError>,
}

/// In-memory [`CommandRunner`] answering per host address.
///
/// Unknown hosts fail with a connection error.
#[derive(Default)]
pub struct ScriptedRunner {
    scripts: HashMap<String, Script>,
    commands: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, host: &str, stdout: &str, stderr: &str) -> Self {
        self.script(host, Ok(CommandOutput::new(stdout, stderr)))
    }

    pub fn respond_with(self, host: &str, output: CommandOutput) -> Self {
        self.script(host, Ok(output))
    }

    pub fn fail(self, host: &str, error: QueryError) -> Self {
        self.script(host, Err(error))
    }

    pub fn delay(mut self, host: &str, delay: Duration) -> Self {
        if let Some(script) = self.scripts.get_mut(host) {
            script.delay = delay;
        }
        self
    }

    fn script(mut self, host: &str, response: Result<CommandOutput, QueryError>) -> Self {
        self.scripts.insert(
            host.to_string(),
            Script {
                delay: Duration::ZERO,
                response,
            },
        );
        self
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, host: &HostDescriptor, command: &str) -> Result<CommandOutput, QueryError> {
        self.commands.lock().unwrap().push(command.to_string());

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let response = match self.scripts.get(&host.host) {
            Some(script) => {
                tokio::time::sleep(script.delay).await;
                script.response.clone()
            }
            None => Err(QueryError::connection(&host.host, "No route to host")),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        response
    }
}
