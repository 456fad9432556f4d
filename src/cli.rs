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

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::common::config::AppConfig;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API serving per-user ZFS usage. (default)
    Api(ApiArgs),
    /// Poll every configured host once and print the result as JSON.
    Poll(PollArgs),
}

#[derive(Parser, Clone, Debug)]
pub struct ApiArgs {
    /// Path to the JSON file listing the ZFS servers.
    #[arg(short, long, default_value = AppConfig::DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
    /// The address to bind the API server to.
    #[arg(short, long, default_value = AppConfig::DEFAULT_BIND_ADDRESS)]
    pub bind: String,
    /// The port to listen on for the API server.
    #[arg(short, long, default_value_t = AppConfig::DEFAULT_API_PORT)]
    pub port: u16,
}

impl Default for ApiArgs {
    fn default() -> Self {
        Self {
            config: PathBuf::from(AppConfig::DEFAULT_CONFIG_PATH),
            bind: AppConfig::DEFAULT_BIND_ADDRESS.to_string(),
            port: AppConfig::DEFAULT_API_PORT,
        }
    }
}

#[derive(Parser, Clone, Debug)]
pub struct PollArgs {
    /// Path to the JSON file listing the ZFS servers.
    #[arg(short, long, default_value = AppConfig::DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
    /// Print compact JSON instead of pretty-printed output.
    #[arg(long)]
    pub compact: bool,
}
