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

use super::error::QueryError;
use super::runner::CommandRunner;
use crate::hosts::HostDescriptor;
use crate::quota::{parse_userspace_output, userspace_command, HostResult, UsageRecord};

/// Queries one host and folds every failure into its [`HostResult`].
pub struct QueryExecutor<R> {
    runner: R,
}

impl<R: CommandRunner> QueryExecutor<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run `zfs userspace` for the descriptor's dataset.
    ///
    /// Never fails: transport, authentication, timeout and remote command
    /// errors all come back as a result with no users and `error` set.
    pub async fn execute(&self, descriptor: &HostDescriptor) -> HostResult {
        match self.query(descriptor).await {
            Ok(users) => {
                tracing::debug!(
                    "{} ({}): {} user(s) on {}",
                    descriptor.name,
                    descriptor.host,
                    users.len(),
                    descriptor.dataset
                );
                HostResult::success(descriptor, users)
            }
            Err(e) => {
                tracing::warn!("{} ({}): {e}", descriptor.name, descriptor.host);
                HostResult::failure(descriptor, e.to_string())
            }
        }
    }

    async fn query(&self, descriptor: &HostDescriptor) -> Result<Vec<UsageRecord>, QueryError> {
        let command = userspace_command(&descriptor.dataset);
        let output = self.runner.run(descriptor, &command).await?;
        if let Some(status) = output.exit_status {
            tracing::debug!("{} ({}): exit status {status}", descriptor.name, descriptor.host);
        }

        // Anything on stderr fails the host, even if stdout has rows.
        let stderr = output.stderr.trim();
        if !stderr.is_empty() {
            return Err(QueryError::RemoteCommand(stderr.to_string()));
        }

        Ok(parse_userspace_output(&output.stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::CommandOutput;
    use crate::utils::test_helpers::{descriptor, ScriptedRunner};

    #[tokio::test]
    async fn test_execute_success() {
        let runner = ScriptedRunner::new().respond(
            "10.0.0.1",
            "alice\t10G\t20G\t100\t200\nbob\t2G\tnone\t5\tnone\n",
            "",
        );
        let executor = QueryExecutor::new(runner);

        let result = executor.execute(&descriptor("A", "10.0.0.1", "pool/a")).await;
        assert_eq!(result.server, "A");
        assert_eq!(result.host, "10.0.0.1");
        assert_eq!(result.dataset, "pool/a");
        assert_eq!(result.error, None);
        assert_eq!(result.users.len(), 2);
        assert_eq!(result.users[0].user, "alice");
        assert_eq!(result.users[1].user, "bob");
    }

    #[tokio::test]
    async fn test_execute_sends_userspace_command() {
        let runner = ScriptedRunner::new().respond("10.0.0.1", "", "");
        let executor = QueryExecutor::new(runner);

        executor.execute(&descriptor("A", "10.0.0.1", "tank/home")).await;
        assert_eq!(
            executor.runner().commands(),
            vec!["zfs userspace -H -o name,used,quota,objused,objquota -S used tank/home"]
        );
    }

    #[tokio::test]
    async fn test_stderr_fails_the_host() {
        let runner = ScriptedRunner::new().respond(
            "10.0.0.1",
            "alice\t10G\t20G\t100\t200\n",
            "  cannot open 'pool/missing': dataset does not exist\n",
        );
        let executor = QueryExecutor::new(runner);

        let result = executor
            .execute(&descriptor("A", "10.0.0.1", "pool/missing"))
            .await;
        assert!(result.users.is_empty());
        assert_eq!(
            result.error.as_deref(),
            Some("cannot open 'pool/missing': dataset does not exist")
        );
    }

    #[tokio::test]
    async fn test_whitespace_stderr_is_ignored() {
        let runner =
            ScriptedRunner::new().respond("10.0.0.1", "alice\t10G\t20G\t100\t200\n", " \n\t");
        let executor = QueryExecutor::new(runner);

        let result = executor.execute(&descriptor("A", "10.0.0.1", "pool/a")).await;
        assert_eq!(result.error, None);
        assert_eq!(result.users.len(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_is_annotated() {
        let runner = ScriptedRunner::new().fail(
            "10.0.0.1",
            QueryError::Authentication {
                user: "root".to_string(),
                host: "10.0.0.1".to_string(),
            },
        );
        let executor = QueryExecutor::new(runner);

        let result = executor.execute(&descriptor("A", "10.0.0.1", "pool/a")).await;
        assert!(result.users.is_empty());
        assert_eq!(
            result.error.as_deref(),
            Some("Authentication failed for root@10.0.0.1")
        );
    }

    #[tokio::test]
    async fn test_exit_status_alone_does_not_fail_the_host() {
        let output = CommandOutput {
            stdout: "alice\t10G\t20G\t100\t200\n".to_string(),
            stderr: String::new(),
            exit_status: Some(1),
        };
        let runner = ScriptedRunner::new().respond_with("10.0.0.1", output);
        let executor = QueryExecutor::new(runner);

        let result = executor.execute(&descriptor("A", "10.0.0.1", "pool/a")).await;
        assert_eq!(result.error, None);
        assert_eq!(result.users.len(), 1);
    }

    #[tokio::test]
    async fn test_no_users_is_not_an_error() {
        let runner = ScriptedRunner::new().respond("10.0.0.1", "\n", "");
        let executor = QueryExecutor::new(runner);

        let result = executor.execute(&descriptor("A", "10.0.0.1", "pool/a")).await;
        assert!(result.users.is_empty());
        assert!(!result.is_error());
    }
}
