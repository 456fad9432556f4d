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

use crate::cli::PollArgs;
use crate::error::Result;
use crate::hosts::MonitorConfig;
use crate::network::QuotaPoller;
use crate::remote::SshRunner;

/// One-shot poll: query every host once and print the JSON to stdout.
pub async fn run_poll_mode(args: &PollArgs) -> Result<()> {
    let config = MonitorConfig::load(&args.config)?;
    let poller = QuotaPoller::new(SshRunner::new());
    let results = poller.poll_all(config.servers()).await?;

    let rendered = if args.compact {
        serde_json::to_string(&results)?
    } else {
        serde_json::to_string_pretty(&results)?
    };
    println!("{rendered}");
    Ok(())
}
