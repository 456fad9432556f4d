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

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{user_disk_usage_handler, ApiState, SharedState};
use crate::cli::ApiArgs;
use crate::common::config::AppConfig;
use crate::error::Result;
use crate::hosts::MonitorConfig;
use crate::network::QuotaPoller;
use crate::remote::{CommandRunner, SshRunner};

/// Build the API router around a poller.
pub fn router<R: CommandRunner + 'static>(state: SharedState<R>) -> Router {
    Router::new()
        .route(AppConfig::USAGE_ROUTE, get(user_disk_usage_handler::<R>))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Load the host list once and serve it until the process exits.
pub async fn run_api_mode(args: &ApiArgs) -> Result<()> {
    let config = Arc::new(MonitorConfig::load(&args.config)?);
    if config.servers().is_empty() {
        tracing::warn!(
            "No ZFS servers configured in {}; every poll will be empty",
            args.config.display()
        );
    }

    let state = Arc::new(ApiState::new(config, QuotaPoller::new(SshRunner::new())));
    let app = router(state);

    let listener = TcpListener::bind((args.bind.as_str(), args.port)).await?;
    tracing::info!(
        "API server listening on {}{}",
        listener.local_addr()?,
        AppConfig::USAGE_ROUTE
    );

    axum::serve(listener, app).await?;
    Ok(())
}
