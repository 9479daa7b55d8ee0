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


//! Runs the salary filter on a local CSV file.

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgMatches, Command};
use log::info;
use salary_filter::prelude::*;
use std::fs;
use std::io::Write;
use std::path::Path;

const LOCAL_INPUT_BUCKET: &str = "local-input";
const LOCAL_OUTPUT_BUCKET: &str = "local-output";

pub fn command_args() -> Command<'static> {
    Command::new("filter")
        .about("Filters a local CSV file the way the lambda function does")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .help("Sets the path to the CSV file to filter")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::new("key")
                .short('k')
                .long("key")
                .value_name("S3_KEY")
                .help("Sets the source key used to derive the output key [default: the file name]")
                .takes_value(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Writes the filtered CSV to a file instead of stdout")
                .takes_value(true),
        )
}

pub async fn command(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .value_of("input")
        .context("No input file provided")?;
    let (report, body) = run(Path::new(input), matches.value_of("key")).await?;

    match (body, matches.value_of("output")) {
        (Some(body), Some(output)) => {
            fs::write(output, &body).with_context(|| format!("Failed to write {}", output))?;
            info!("Filtered CSV written to {}", output);
            println!("{}", serde_json::to_string(&report)?);
        }
        (Some(body), None) => {
            std::io::stdout().write_all(&body)?;
            eprintln!("{}", serde_json::to_string(&report)?);
        }
        (None, _) => println!("{}", serde_json::to_string(&report)?),
    }
    Ok(())
}

/// Filters the file at `input` as if it had been uploaded under `key`.
///
/// # Returns
/// The report and, on success, the filtered document.
pub async fn run(input: &Path, key: Option<&str>) -> Result<(Report, Option<Vec<u8>>)> {
    if !input.exists() {
        bail!("The input file ({}) doesn't exist.", input.display());
    }

    let key = match key {
        Some(key) => key.to_owned(),
        None => input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .context("The input path has no file name")?,
    };

    let store = MemoryObjectStore::new();
    store.insert(LOCAL_INPUT_BUCKET, &key, fs::read(input)?, &FILTER_CONTENT_TYPE);

    let report = process_object(
        &store,
        &ObjectRef::new(LOCAL_INPUT_BUCKET, key),
        &FilterConfig::new(LOCAL_OUTPUT_BUCKET),
    )
    .await?;

    let body = match &report {
        Report::Success { output_key } => store
            .object(LOCAL_OUTPUT_BUCKET, output_key)
            .map(|object| object.body),
        _ => None,
    };
    Ok((report, body))
}
