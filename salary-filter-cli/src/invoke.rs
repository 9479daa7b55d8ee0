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


//! Runs the salary filter against an object stored in AWS S3.

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use salary_filter::prelude::*;

pub fn command_args() -> Command<'static> {
    Command::new("invoke")
        .about("Filters an object in AWS S3 and stores the result, like the lambda function")
        .arg(
            Arg::new("bucket")
                .short('b')
                .long("bucket")
                .value_name("BUCKET")
                .help("Sets the source bucket")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::new("key")
                .short('k')
                .long("key")
                .value_name("S3_KEY")
                .help("Sets the source object key")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::new("output bucket")
                .long("output-bucket")
                .value_name("BUCKET")
                .help("Sets the destination bucket [default: $OUTPUT_BUCKET]")
                .takes_value(true),
        )
}

pub async fn command(matches: &ArgMatches) -> Result<()> {
    let bucket = matches.value_of("bucket").context("No source bucket provided")?;
    let key = matches.value_of("key").context("No source key provided")?;
    let config = match matches.value_of("output bucket") {
        Some(output_bucket) => FilterConfig::new(output_bucket),
        None => FilterConfig::from_env()?,
    };

    let source = ObjectRef::new(bucket, key);
    let report = process_object(&S3ObjectStore::new(), &source, &config).await?;
    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}
