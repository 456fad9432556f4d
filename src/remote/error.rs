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

use thiserror::Error;

/// Why a single host could not be queried.
///
/// Every variant is converted into the `error` text of that host's
/// [`HostResult`](crate::quota::HostResult); none of them fail a poll.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Host unreachable, connection refused, handshake failure or connect timeout.
    #[error("Failed to connect to {host}: {reason}")]
    Connection { host: String, reason: String },

    /// The server rejected the credentials.
    #[error("Authentication failed for {user}@{host}")]
    Authentication { user: String, host: String },

    /// The command did not finish within the execution window.
    #[error("Command timed out after {0:?}")]
    ExecutionTimeout(Duration),

    /// The session broke while the command was running.
    #[error("SSH channel error: {0}")]
    Channel(String),

    /// The command output on one stream was not valid UTF-8.
    #[error("Remote {stream} is not valid UTF-8: {reason}")]
    InvalidOutput {
        stream: &'static str,
        reason: String,
    },

    /// The command ran but wrote to stderr. Holds the trimmed stderr text.
    #[error("{0}")]
    RemoteCommand(String),
}

impl QueryError {
    pub fn connection(host: &str, reason: impl ToString) -> Self {
        Self::Connection {
            host: host.to_string(),
            reason: reason.to_string(),
        }
    }
}
