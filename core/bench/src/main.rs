/* Licensed to the Apache Software Foundation (ASF) under one
 * or more contributor license agreements.  See the NOTICE file
 * distributed with this work for additional information
 * regarding copyright ownership.  The ASF licenses this file
 * to you under the Apache License, Version 2.0 (the
 * "License"); you may not use this file except in compliance
 * with the License.  You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing,
 * software distributed under the License is distributed on an
 * "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
 * KIND, either express or implied.  See the License for the
 * specific language governing permissions and limitations
 * under the License.
 */

mod actors;
mod analytics;
mod args;
mod dictionary;
mod driver;
mod error;
mod plot;
mod runner;
mod utils;

use crate::{args::common::QueryBenchArgs, runner::SweepRunner};
use anyhow::Result;
use clap::{CommandFactory, Parser, error::ErrorKind};
use tracing::info;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::Format},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = QueryBenchArgs::parse();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().event_format(Format::default().with_thread_ids(true)))
        .with(env_filter)
        .try_init()?;

    if let Err(e) = args.validate() {
        QueryBenchArgs::command()
            .error(ErrorKind::ArgumentConflict, e.to_string())
            .exit();
    }

    let report = SweepRunner::new(args).run().await?;
    info!(
        "Sweep {} finished with {} points",
        report.uuid,
        report.sweep.len()
    );
    Ok(())
}
