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

//! Process-level error types for zfs-monitor-api.
//!
//! Per-host failures never show up here: they are absorbed by the remote
//! query executor and reported inside each [`HostResult`]. The variants
//! below cover startup (configuration) and the aggregator's own scheduling.
//!
//! [`HostResult`]: crate::quota::HostResult

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for zfs-monitor-api operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration file could not be read.
    #[error("Failed to read configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON or misses required keys.
    #[error("Invalid configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A poll worker could not be started or did not finish normally.
    ///
    /// This is not a per-host condition; it means the fan-out itself broke.
    #[error("Poll scheduling failed: {0}")]
    Scheduling(String),

    /// JSON serialization failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for zfs-monitor-api operations.
pub type Result<T> = std::result::Result<T, Error>;
