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


//! This module provides the default configurations for the salary filter.

mod settings;
pub use self::settings::FILTER_CONF;

use crate::error::{Result, SalaryFilterError};
use lazy_static::lazy_static;
use log::error;
use rusoto_core::Region;
use rusoto_s3::S3Client;

lazy_static! {
    /// Rows are kept only when their salary is strictly greater than this value.
    pub static ref FILTER_SALARY_THRESHOLD: f64 = FILTER_CONF["filter"]["salary_threshold"]
        .parse::<f64>()
        .expect("salary_threshold is a number");
    /// The path segment inserted above the file name of the output key.
    pub static ref FILTER_OUTPUT_SEGMENT: String = FILTER_CONF["filter"]["output_segment"].to_string();
    /// The content type of the stored output object.
    pub static ref FILTER_CONTENT_TYPE: String = FILTER_CONF["filter"]["content_type"].to_string();
    /// The environment variable naming the destination bucket.
    pub static ref FILTER_OUTPUT_BUCKET_ENV: String = FILTER_CONF["lambda"]["output_bucket_env"].to_string();

    /// Salary filter S3 Client.
    pub static ref FILTER_S3_CLIENT: S3Client = S3Client::new(Region::default());
}

/// Runtime configuration supplied by the hosting environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// The bucket the filtered documents are written to.
    pub output_bucket: String,
}

impl FilterConfig {
    /// Creates a configuration that writes to the given bucket.
    pub fn new(output_bucket: impl Into<String>) -> Self {
        Self {
            output_bucket: output_bucket.into(),
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// A missing or empty destination bucket is fatal: the function must not
    /// start serving events without somewhere to write.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let name = FILTER_OUTPUT_BUCKET_ENV.as_str();
        match lookup(name) {
            Some(bucket) if !bucket.trim().is_empty() => Ok(Self::new(bucket.trim())),
            _ => {
                error!("Environment variable {} is not set.", name);
                Err(SalaryFilterError::Configuration(format!(
                    "the destination bucket environment variable {} is not set",
                    name
                )))
            }
        }
    }
}
