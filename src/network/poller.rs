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

use std::sync::Arc;
use std::time::Instant;

use futures_util::future::join_all;
use tokio::sync::Semaphore;

use crate::common::config::EnvConfig;
use crate::error::{Error, Result};
use crate::hosts::HostDescriptor;
use crate::quota::HostResult;
use crate::remote::{CommandRunner, QueryExecutor};

/// Fans a poll out to every configured host.
pub struct QuotaPoller<R> {
    executor: Arc<QueryExecutor<R>>,
}

impl<R> Clone for QuotaPoller<R> {
    fn clone(&self) -> Self {
        Self {
            executor: self.executor.clone(),
        }
    }
}

impl<R: CommandRunner + 'static> QuotaPoller<R> {
    pub fn new(runner: R) -> Self {
        Self {
            executor: Arc::new(QueryExecutor::new(runner)),
        }
    }

    pub fn executor(&self) -> &QueryExecutor<R> {
        &self.executor
    }

    /// Query every host concurrently and wait for all of them.
    ///
    /// `results[i]` always answers `hosts[i]`, whatever order the queries
    /// finish in. Per-host failures are reported inside each result; an
    /// `Err` here means a worker itself could not run.
    pub async fn poll_all(&self, hosts: &[HostDescriptor]) -> Result<Vec<HostResult>> {
        let start = Instant::now();
        let semaphore = Arc::new(Semaphore::new(EnvConfig::max_concurrent_connections(
            hosts.len(),
        )));

        let mut workers = Vec::with_capacity(hosts.len());
        for host in hosts {
            let executor = self.executor.clone();
            let semaphore = semaphore.clone();
            let host = host.clone();

            workers.push(tokio::spawn(async move {
                // Acquire semaphore permit to limit concurrency
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| Error::Scheduling(e.to_string()))?;
                Ok::<_, Error>(executor.execute(&host).await)
            }));
        }

        let mut results = Vec::with_capacity(workers.len());
        for (index, joined) in join_all(workers).await.into_iter().enumerate() {
            let result = joined.map_err(|e| {
                Error::Scheduling(format!("worker for host #{index} did not complete: {e}"))
            })??;
            results.push(result);
        }

        let failed = results.iter().filter(|r| r.is_error()).count();
        tracing::info!(
            "Polled {} host(s) in {:?}, {failed} failed",
            results.len(),
            start.elapsed()
        );

        Ok(results)
    }
}
