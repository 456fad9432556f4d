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

use clap::Parser;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zfs_monitor_api::api::run_api_mode;
use zfs_monitor_api::cli::{ApiArgs, Cli, Commands};
use zfs_monitor_api::common::config::AppConfig;
use zfs_monitor_api::poll::run_poll_mode;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so `poll` output on stdout stays valid JSON.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| AppConfig::DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Set up signal handler for clean shutdown
    tokio::spawn(async {
        match signal::ctrl_c().await {
            Ok(()) => std::process::exit(0),
            Err(e) => tracing::warn!("Failed to listen for Ctrl+C: {e}"),
        }
    });

    // Also handle SIGTERM on Unix systems
    #[cfg(unix)]
    tokio::spawn(async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                std::process::exit(0);
            }
            Err(e) => tracing::warn!("Failed to listen for SIGTERM: {e}"),
        }
    });

    let result = match cli.command {
        Some(Commands::Api(args)) => run_api_mode(&args).await,
        Some(Commands::Poll(args)) => run_poll_mode(&args).await,
        // Default to API mode when no command is specified
        None => run_api_mode(&ApiArgs::default()).await,
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
