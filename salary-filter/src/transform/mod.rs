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


//! The salary transform: fetch a CSV document, keep the rows whose salary is
//! above the threshold, and store the reduced document under a derived key.
//!
//! An invocation moves through the stages
//!
//! ```text
//! Fetch -> Parse -> Detect -> Filter -> Project -> Serialize -> Store -> Report
//! ```
//!
//! The destination object is written at most once, in full, after filtering
//! has completed. Any error before the store stage leaves the destination
//! bucket untouched.

pub mod columns;
pub mod encoding;
pub mod key;
pub mod salary;

pub use columns::{ColumnRoles, NAME_SYNONYMS, SALARY_SYNONYMS};
pub use key::build_output_key;
pub use salary::{exceeds_threshold, format_salary, parse_salary, ParsedSalary};

use crate::configs::{FilterConfig, FILTER_CONTENT_TYPE};
use crate::error::{Result, SalaryFilterError};
use crate::event::{source_object, ObjectRef};
use crate::storage::ObjectStore;
use aws_lambda_events::event::s3::S3Event;
use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

/// The status record returned to the trigger environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Report {
    /// The document has no data rows. Nothing was written.
    EmptyCsv,
    /// The document has rows but none passed the filter. Nothing was written.
    NoResults,
    /// The filtered document was stored at `output_key`.
    Success {
        /// The destination key of the filtered document.
        output_key: String,
    },
}

/// One row of the output document.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredEntry {
    /// The trimmed name cell, present only when a name column was detected.
    pub name:   Option<String>,
    /// The parsed salary.
    pub salary: f64,
}

/// The result of filtering a document body, before anything is stored.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    /// The document has no data rows.
    Empty,
    /// The document has `total_rows` rows and none passed the filter.
    NoResults {
        /// The number of data rows in the document.
        total_rows: usize,
    },
    /// Some rows passed the filter.
    Filtered {
        /// The number of data rows in the document.
        total_rows: usize,
        /// The kept rows, in input order.
        entries:    Vec<FilteredEntry>,
        /// The serialized output document.
        body:       Vec<u8>,
    },
}

/// Parses `body` as a CSV table with a header row and filters its rows.
///
/// No I/O happens here; the caller decides whether and where to store the
/// result.
pub fn filter_csv(body: &[u8]) -> Result<FilterOutcome> {
    let text = encoding::decode_body(body)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let rows = reader.records().collect::<std::result::Result<Vec<StringRecord>, _>>()?;
    if rows.is_empty() {
        warn!("Uploaded CSV is empty; nothing to process.");
        return Ok(FilterOutcome::Empty);
    }

    let headers = headers.iter().collect::<Vec<_>>();
    let roles = ColumnRoles::detect(&headers[..])?;

    let entries = rows
        .iter()
        .filter_map(|row| project(row, &roles))
        .collect::<Vec<_>>();

    info!(
        "Filtered dataset contains {} rows out of {}",
        entries.len(),
        rows.len()
    );

    if entries.is_empty() {
        return Ok(FilterOutcome::NoResults {
            total_rows: rows.len(),
        });
    }

    let body = serialize(&entries, &roles)?;
    Ok(FilterOutcome::Filtered {
        total_rows: rows.len(),
        entries,
        body,
    })
}

/// Keeps a row as a [`FilteredEntry`] if its salary passes the filter.
fn project(row: &StringRecord, roles: &ColumnRoles) -> Option<FilteredEntry> {
    let raw = row.get(roles.salary);
    let salary = match parse_salary(raw) {
        ParsedSalary::Value(v) => v,
        ParsedSalary::Missing => return None,
        ParsedSalary::Unparseable => {
            warn!(
                "Unable to parse salary value '{}'; skipping row.",
                raw.unwrap_or_default()
            );
            return None;
        }
    };
    if !exceeds_threshold(salary) {
        return None;
    }

    Some(FilteredEntry {
        name: roles
            .name
            .map(|i| row.get(i).unwrap_or_default().trim().to_owned()),
        salary,
    })
}

/// Renders the kept rows as a CSV document with a fixed header. Records end
/// with `\r\n`.
fn serialize(entries: &[FilteredEntry], roles: &ColumnRoles) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(vec![]);
    writer.write_record(roles.output_headers())?;
    for entry in entries {
        let salary = format_salary(entry.salary);
        match &entry.name {
            Some(name) => writer.write_record([name.as_str(), salary.as_str()])?,
            None => writer.write_record([salary.as_str()])?,
        }
    }
    writer
        .into_inner()
        .map_err(|e| SalaryFilterError::IoError(e.into_error()))
}

/// Runs the full transform for one source object.
///
/// # Arguments
/// * `store` - The object store holding both buckets.
/// * `source` - The uploaded object.
/// * `config` - The runtime configuration naming the destination bucket.
///
/// # Returns
/// The status record for the trigger environment.
pub async fn process_object(
    store: &dyn ObjectStore,
    source: &ObjectRef,
    config: &FilterConfig,
) -> Result<Report> {
    info!("Processing file {}", source);

    let body = store.get(&source.bucket, &source.key).await.map_err(|e| {
        error!(
            "Failed to download object {} from bucket {}: {}",
            source.key, source.bucket, e
        );
        e
    })?;

    let outcome = filter_csv(&body).map_err(|e| {
        error!("Failed to filter {}: {}", source, e);
        e
    })?;

    let body = match outcome {
        FilterOutcome::Empty => return Ok(Report::EmptyCsv),
        FilterOutcome::NoResults { .. } => {
            info!("No rows matched the salary criteria; skipping upload.");
            return Ok(Report::NoResults);
        }
        FilterOutcome::Filtered { body, .. } => body,
    };

    let target = ObjectRef::new(&config.output_bucket, build_output_key(&source.key));
    store
        .put(&target.bucket, &target.key, body, &FILTER_CONTENT_TYPE)
        .await
        .map_err(|e| {
            error!("Failed to upload filtered CSV to {}: {}", target, e);
            e
        })?;

    info!("Filtered CSV successfully stored at {}", target);
    Ok(Report::Success {
        output_key: target.key,
    })
}

/// Handles an S3 object-creation notification. Only the first record is
/// processed.
pub async fn handle_event(
    store: &dyn ObjectStore,
    event: &S3Event,
    config: &FilterConfig,
) -> Result<Report> {
    let source = source_object(event).map_err(|e| {
        error!("Failed to read the source object from the notification: {}", e);
        e
    })?;
    process_object(store, &source, config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filtered(body: &str) -> (usize, Vec<FilteredEntry>, String) {
        match filter_csv(body.as_bytes()).unwrap() {
            FilterOutcome::Filtered {
                total_rows,
                entries,
                body,
            } => (total_rows, entries, String::from_utf8(body).unwrap()),
            other => panic!("expected filtered rows, got {:?}", other),
        }
    }

    #[test]
    fn name_and_wage_columns() {
        let (total, entries, body) = filtered("Name,Wage\nAnn,2000\nBo,500\n");
        assert_eq!(2, total);
        assert_eq!(
            vec![FilteredEntry {
                name:   Some("Ann".to_owned()),
                salary: 2000.0,
            }],
            entries
        );
        assert_eq!("name,salary\r\nAnn,2000.0\r\n", body);
    }

    #[test]
    fn salary_only_output() {
        let (_, _, body) = filtered("id,Salary\n1,\"1,500\"\n2,999\n3,1000.01\n");
        assert_eq!("salary\r\n1500.0\r\n1000.01\r\n", body);
    }

    #[test]
    fn bad_cells_are_dropped() {
        let (total, entries, body) =
            filtered("nombre,sueldos\n  Ana  ,abc\nLuis,\nEva,\" 3,250 \"\nPia,1000\n");
        assert_eq!(4, total);
        assert_eq!(1, entries.len());
        assert_eq!("name,salary\r\nEva,3250.0\r\n", body);
    }

    #[test]
    fn names_are_trimmed_and_quoted() {
        let (_, _, body) = filtered("employee,income\n\"  Doe, Jane \",5000\n");
        assert_eq!("name,salary\r\n\"Doe, Jane\",5000.0\r\n", body);
    }

    #[test]
    fn short_rows_have_absent_cells() {
        let (total, entries, body) = filtered("salary,name\n2500\n800,Bo\n4000,Cy,extra\n");
        assert_eq!(3, total);
        assert_eq!(Some(String::new()), entries[0].name);
        assert_eq!("name,salary\r\n,2500.0\r\nCy,4000.0\r\n", body);
    }

    #[test]
    fn repeated_salary_header() {
        let (total, entries, body) = filtered("salary,salary\n10,5000\n");
        assert_eq!(1, total);
        assert_eq!(5000.0, entries[0].salary);
        assert_eq!("salary\r\n5000.0\r\n", body);
    }

    #[test]
    fn header_only_is_empty() {
        assert_eq!(FilterOutcome::Empty, filter_csv(b"name,salary\n").unwrap());
        assert_eq!(FilterOutcome::Empty, filter_csv(b"").unwrap());
    }

    #[test]
    fn empty_check_precedes_column_detection() {
        assert_eq!(FilterOutcome::Empty, filter_csv(b"id,amount\n").unwrap());
    }

    #[test]
    fn nothing_above_threshold() {
        assert_eq!(
            FilterOutcome::NoResults { total_rows: 3 },
            filter_csv(b"salary\n1000\n12\nn/a\n").unwrap()
        );
    }

    #[test]
    fn missing_salary_column() {
        match filter_csv(b"name,amount\nAnn,2000\n") {
            Err(SalaryFilterError::Schema(_)) => {}
            other => panic!("expected a schema error, got {:?}", other),
        }
    }

    #[test]
    fn report_wire_format() {
        assert_eq!(
            r#"{"status":"empty_csv"}"#,
            serde_json::to_string(&Report::EmptyCsv).unwrap()
        );
        assert_eq!(
            r#"{"status":"no_results"}"#,
            serde_json::to_string(&Report::NoResults).unwrap()
        );
        assert_eq!(
            r#"{"status":"success","output_key":"data/filtered/input.csv"}"#,
            serde_json::to_string(&Report::Success {
                output_key: "data/filtered/input.csv".to_owned()
            })
            .unwrap()
        );
    }
}
