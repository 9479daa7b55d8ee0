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

//! Salary filter error types

use std::error;
use std::fmt::{Display, Formatter};
use std::io;
use std::result;

/// Result type for operations that could result in an [SalaryFilterError]
pub type Result<T> = result::Result<T, SalaryFilterError>;

/// Salary filter error
#[derive(Debug)]
pub enum SalaryFilterError {
    /// Error associated to Lambda runtime execution.
    LambdaError(Box<dyn std::error::Error + Send + Sync>),
    /// Error associated to I/O operations and associated traits.
    IoError(io::Error),
    /// Error returned when the uploaded document is not a well-formed CSV
    /// table.
    Csv(csv::Error),
    /// Error returned when serde_json failed to serialize or deserialize data.
    SerdeJson(serde_json::Error),
    /// Error returned when a required setting is missing or invalid, such as
    /// the destination bucket environment variable.
    Configuration(String),
    /// Error returned when the triggering notification does not identify a
    /// source object.
    Event(String),
    /// Error returned when the document has no recognizable salary column.
    /// The document is unusable and the invocation is not retried.
    Schema(String),
    /// Error returned when the document body cannot be decoded as text.
    Encoding(String),
    /// Error returned when accessing the AWS services fails.
    AWS(String),
    /// Error returned as a consequence of an error in the salary filter.
    /// This error should not happen in normal usage.
    Internal(String),
}

impl From<io::Error> for SalaryFilterError {
    fn from(e: io::Error) -> Self {
        SalaryFilterError::IoError(e)
    }
}

impl From<csv::Error> for SalaryFilterError {
    fn from(e: csv::Error) -> Self {
        SalaryFilterError::Csv(e)
    }
}

impl From<serde_json::Error> for SalaryFilterError {
    fn from(e: serde_json::Error) -> Self {
        SalaryFilterError::SerdeJson(e)
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for SalaryFilterError {
    fn from(e: Box<dyn std::error::Error + Send + Sync>) -> Self {
        SalaryFilterError::LambdaError(e)
    }
}

impl From<&str> for SalaryFilterError {
    fn from(e: &str) -> Self {
        SalaryFilterError::Internal(e.to_string())
    }
}

impl Display for SalaryFilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            SalaryFilterError::LambdaError(ref desc) => write!(f, "Lambda error: {}", desc),
            SalaryFilterError::IoError(ref desc) => write!(f, "IO error: {}", desc),
            SalaryFilterError::Csv(ref desc) => write!(f, "CSV error: {}", desc),
            SalaryFilterError::SerdeJson(ref desc) => write!(f, "serde_json error: {:?}", desc),
            SalaryFilterError::Configuration(ref desc) => {
                write!(f, "Configuration error: {}", desc)
            }
            SalaryFilterError::Event(ref desc) => write!(f, "Invalid trigger event: {}", desc),
            SalaryFilterError::Schema(ref desc) => write!(f, "Schema error: {}", desc),
            SalaryFilterError::Encoding(ref desc) => write!(f, "Encoding error: {}", desc),
            SalaryFilterError::AWS(ref desc) => write!(f, "AWS error: {}", desc),
            SalaryFilterError::Internal(ref desc) => write!(
                f,
                "Internal error: {}. This was likely caused by a bug in the salary filter's \
                    code and we would welcome that you file an bug report in our issue tracker",
                desc
            ),
        }
    }
}

impl error::Error for SalaryFilterError {}
