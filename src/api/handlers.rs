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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::Error;
use crate::hosts::MonitorConfig;
use crate::network::QuotaPoller;
use crate::quota::HostResult;
use crate::remote::CommandRunner;

pub struct ApiState<R> {
    pub config: Arc<MonitorConfig>,
    pub poller: QuotaPoller<R>,
}

impl<R: CommandRunner + 'static> ApiState<R> {
    pub fn new(config: Arc<MonitorConfig>, poller: QuotaPoller<R>) -> Self {
        Self { config, poller }
    }
}

pub type SharedState<R> = Arc<ApiState<R>>;

/// `GET /user_disk_usage`: poll every configured host once.
pub async fn user_disk_usage_handler<R: CommandRunner + 'static>(
    State(state): State<SharedState<R>>,
) -> Result<Json<Vec<HostResult>>, ApiError> {
    let results = state.poller.poll_all(state.config.servers()).await?;
    Ok(Json(results))
}

/// A poll that could not run at all. Per-host failures never get here.
#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("Poll failed: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}
