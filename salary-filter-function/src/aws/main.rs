// Copyright (c) 2020-present, UMD Database Group.
//
// This program is free software: you can use, redistribute, and/or modify
// it under the terms of the GNU Affero General Public License, version 3
// or later ("AGPL"), as published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
// FITNESS FOR A PARTICULAR PURPOSE.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.


//! The main entry point for the salary filter lambda function.

use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::{service_fn, LambdaEvent};
use log::info;
use salary_filter::prelude::*;
use serde_json::Value;

#[cfg(feature = "snmalloc")]
#[global_allocator]
static ALLOC: snmalloc_rs::SnMalloc = snmalloc_rs::SnMalloc;

#[cfg(feature = "mimalloc")]
#[global_allocator]
static ALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;

async fn handler(
    store: &dyn ObjectStore,
    config: &FilterConfig,
    event: LambdaEvent<S3Event>,
) -> Result<Value> {
    info!("Request id: {}", event.context.request_id);
    let report = handle_event(store, &event.payload, config).await?;
    Ok(serde_json::to_value(&report)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = FilterConfig::from_env()?;
    let store = S3ObjectStore::new();
    info!(
        "AWS Lambda function architecture: {}, output bucket: {}",
        std::env::consts::ARCH,
        config.output_bucket
    );

    lambda_runtime::run(service_fn(|event| handler(&store, &config, event))).await?;
    Ok(())
}
