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

//! SSH transport for remote queries, built on russh.
//!
//! Host keys are accepted without verification: there is no known-hosts
//! store, so any key a server presents is trusted. Treat the network
//! between this service and the storage hosts as the trust boundary.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use russh::client::{self, Handle};
use russh::{ChannelMsg, Disconnect};
use russh_keys::key::PublicKey;
use tokio::time::{timeout, timeout_at, Instant};

use super::error::QueryError;
use super::runner::{CommandOutput, CommandRunner};
use crate::common::config::EnvConfig;
use crate::hosts::HostDescriptor;

/// SSH extended data stream number for stderr.
const SSH_EXTENDED_DATA_STDERR: u32 = 1;

struct AcceptAnyHostKey;

#[async_trait]
impl client::Handler for AcceptAnyHostKey {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> Result<bool, Self::Error> {
        tracing::trace!("Accepting host key {}", server_public_key.fingerprint());
        Ok(true)
    }
}

/// Runs commands over password-authenticated SSH sessions.
pub struct SshRunner {
    config: Arc<client::Config>,
    connect_timeout: Duration,
    command_timeout: Duration,
}

impl SshRunner {
    pub fn new() -> Self {
        Self::with_timeouts(EnvConfig::connection_timeout(), EnvConfig::command_timeout())
    }

    /// `connect_timeout` covers TCP connect, key exchange and authentication.
    /// `command_timeout` covers opening the channel and reading all output.
    pub fn with_timeouts(connect_timeout: Duration, command_timeout: Duration) -> Self {
        Self {
            config: Arc::new(client::Config::default()),
            connect_timeout,
            command_timeout,
        }
    }

    async fn connect(
        &self,
        host: &HostDescriptor,
        deadline: Instant,
    ) -> Result<Handle<AcceptAnyHostKey>, QueryError> {
        let addr = (host.host.as_str(), host.port);
        let connect = client::connect(self.config.clone(), addr, AcceptAnyHostKey);
        match timeout_at(deadline, connect).await {
            Ok(Ok(session)) => Ok(session),
            Ok(Err(e)) => Err(QueryError::connection(&host.host, e)),
            Err(_) => Err(self.connect_timed_out(host)),
        }
    }

    async fn authenticate(
        &self,
        session: &mut Handle<AcceptAnyHostKey>,
        host: &HostDescriptor,
        deadline: Instant,
    ) -> Result<(), QueryError> {
        let auth = session.authenticate_password(host.user.as_str(), host.password.as_str());
        match timeout_at(deadline, auth).await {
            Ok(Ok(true)) => Ok(()),
            Ok(Ok(false)) => Err(QueryError::Authentication {
                user: host.user.clone(),
                host: host.host.clone(),
            }),
            Ok(Err(e)) => Err(QueryError::connection(&host.host, e)),
            Err(_) => Err(self.connect_timed_out(host)),
        }
    }

    async fn execute(
        &self,
        session: &Handle<AcceptAnyHostKey>,
        command: &str,
    ) -> Result<CommandOutput, QueryError> {
        match timeout(self.command_timeout, read_command_output(session, command)).await {
            Ok(Ok(raw)) => raw.decode(),
            Ok(Err(e)) => Err(QueryError::Channel(e.to_string())),
            Err(_) => Err(QueryError::ExecutionTimeout(self.command_timeout)),
        }
    }

    fn connect_timed_out(&self, host: &HostDescriptor) -> QueryError {
        QueryError::connection(
            &host.host,
            format!("timed out after {:?}", self.connect_timeout),
        )
    }
}

impl Default for SshRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for SshRunner {
    async fn run(&self, host: &HostDescriptor, command: &str) -> Result<CommandOutput, QueryError> {
        let deadline = Instant::now() + self.connect_timeout;
        let mut session = self.connect(host, deadline).await?;

        let outcome = match self.authenticate(&mut session, host, deadline).await {
            Ok(()) => self.execute(&session, command).await,
            Err(e) => Err(e),
        };

        // The session is closed on every path once it exists.
        if let Err(e) = session
            .disconnect(Disconnect::ByApplication, "", "English")
            .await
        {
            tracing::debug!("Failed to close SSH session to {}: {e}", host.host);
        }

        outcome
    }
}

/// Output bytes as received, before decoding.
struct RawOutput {
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    exit_status: Option<u32>,
}

impl RawOutput {
    fn decode(self) -> Result<CommandOutput, QueryError> {
        Ok(CommandOutput {
            stdout: decode_stream("stdout", self.stdout)?,
            stderr: decode_stream("stderr", self.stderr)?,
            exit_status: self.exit_status,
        })
    }
}

/// Invalid UTF-8 fails the host rather than being replaced.
fn decode_stream(stream: &'static str, bytes: Vec<u8>) -> Result<String, QueryError> {
    String::from_utf8(bytes).map_err(|e| QueryError::InvalidOutput {
        stream,
        reason: e.utf8_error().to_string(),
    })
}

async fn read_command_output(
    session: &Handle<AcceptAnyHostKey>,
    command: &str,
) -> Result<RawOutput, russh::Error> {
    let mut channel = session.channel_open_session().await?;
    channel.exec(true, command).await?;

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let mut exit_status = None;

    while let Some(msg) = channel.wait().await {
        match msg {
            ChannelMsg::Data { ref data } => stdout.extend_from_slice(data),
            ChannelMsg::ExtendedData { ref data, ext } if ext == SSH_EXTENDED_DATA_STDERR => {
                stderr.extend_from_slice(data)
            }
            ChannelMsg::ExitStatus {
                exit_status: status,
            } => exit_status = Some(status),
            _ => {}
        }
    }

    Ok(RawOutput {
        stdout,
        stderr,
        exit_status,
    })
}
