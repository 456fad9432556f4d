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

//! Poll ZFS storage hosts over SSH for per-user quota usage.
//!
//! [`network::QuotaPoller`] fans one `zfs userspace` query out per
//! configured [`hosts::HostDescriptor`] and returns one
//! [`quota::HostResult`] per host, in configuration order. Hosts that
//! cannot be reached or whose command fails are reported through the
//! result's `error` field instead of failing the whole poll.

pub mod api;
pub mod cli;
pub mod error;
pub mod hosts;
pub mod network;
pub mod poll;
pub mod quota;
pub mod remote;
#[cfg(test)]
mod utils;

pub mod common {
    pub mod config;
}

pub use error::{Error, Result};
