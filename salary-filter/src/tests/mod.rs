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


//! End-to-end scenarios of the salary transform over an in-memory object
//! store.

use crate::prelude::*;
use crate::test_util::s3_event;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const INPUT_BUCKET: &str = "input-bucket";
const OUTPUT_BUCKET: &str = "output-bucket";

fn config() -> FilterConfig {
    FilterConfig::new(OUTPUT_BUCKET)
}

fn store_with(key: &str, body: &str) -> MemoryObjectStore {
    let store = MemoryObjectStore::new();
    store.insert(INPUT_BUCKET, key, body, "text/csv");
    store
}

/// An object store whose writes always fail.
#[derive(Debug, Default)]
struct ReadOnlyStore {
    inner: MemoryObjectStore,
}

#[async_trait]
impl ObjectStore for ReadOnlyStore {
    fn name(&self) -> String {
        "ReadOnlyStore".to_string()
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        self.inner.get(bucket, key).await
    }

    async fn put(
        &self,
        bucket: &str,
        _key: &str,
        _body: Vec<u8>,
        _content_type: &str,
    ) -> Result<()> {
        Err(SalaryFilterError::AWS(format!(
            "AccessDenied: no write access to {}",
            bucket
        )))
    }
}

#[tokio::test]
async fn name_and_wage_scenario() -> Result<()> {
    let store = store_with("data/input.csv", "Name,Wage\nAnn,2000\nBo,500\n");
    let event = s3_event(&[(INPUT_BUCKET, "data/input.csv")]);

    let report = handle_event(&store, &event, &config()).await?;
    assert_eq!(
        Report::Success {
            output_key: "data/filtered/input.csv".to_owned(),
        },
        report
    );

    let object = store
        .object(OUTPUT_BUCKET, "data/filtered/input.csv")
        .expect("the filtered document is stored");
    assert_eq!(
        "name,salary\r\nAnn,2000.0\r\n",
        String::from_utf8(object.body).unwrap()
    );
    assert_eq!("text/csv", object.content_type);
    assert_eq!(1, store.write_count());
    Ok(())
}

#[tokio::test]
async fn top_level_object() -> Result<()> {
    let store = store_with("input.csv", "salary\n\"1,500\"\n");
    let source = ObjectRef::new(INPUT_BUCKET, "input.csv");
    let report = process_object(&store, &source, &config()).await?;
    assert_eq!(
        Report::Success {
            output_key: "filtered/input.csv".to_owned(),
        },
        report
    );
    assert_eq!(vec!["filtered/input.csv".to_owned()], store.keys(OUTPUT_BUCKET));
    Ok(())
}

#[tokio::test]
async fn empty_csv_writes_nothing() -> Result<()> {
    let store = store_with("data/empty.csv", "name,salary\n");
    let event = s3_event(&[(INPUT_BUCKET, "data/empty.csv")]);

    assert_eq!(Report::EmptyCsv, handle_event(&store, &event, &config()).await?);
    assert_eq!(0, store.write_count());
    assert!(store.keys(OUTPUT_BUCKET).is_empty());
    Ok(())
}

#[tokio::test]
async fn no_results_writes_nothing() -> Result<()> {
    let store = store_with("data/low.csv", "name,salary\nAnn,1000\nBo,500\nCy,abc\n");
    let event = s3_event(&[(INPUT_BUCKET, "data/low.csv")]);

    assert_eq!(Report::NoResults, handle_event(&store, &event, &config()).await?);
    assert_eq!(0, store.write_count());
    Ok(())
}

#[tokio::test]
async fn missing_salary_column_fails_without_writing() {
    let store = store_with("data/input.csv", "name,amount\nAnn,2000\n");
    let event = s3_event(&[(INPUT_BUCKET, "data/input.csv")]);

    match handle_event(&store, &event, &config()).await {
        Err(SalaryFilterError::Schema(msg)) => assert!(msg.contains("salary column")),
        other => panic!("expected a schema error, got {:?}", other),
    }
    assert_eq!(0, store.write_count());
}

#[tokio::test]
async fn undecodable_body_fails_without_writing() {
    let store = MemoryObjectStore::new();
    store.insert(
        INPUT_BUCKET,
        "data/binary.csv",
        b"\x80\x81\x82\x83\x84\x85".to_vec(),
        "text/csv",
    );
    let event = s3_event(&[(INPUT_BUCKET, "data/binary.csv")]);

    match handle_event(&store, &event, &config()).await {
        Err(SalaryFilterError::Encoding(_)) => {}
        other => panic!("expected an encoding error, got {:?}", other),
    }
    assert_eq!(0, store.write_count());
}

#[tokio::test]
async fn event_without_records_fails_without_writing() {
    let store = store_with("data/input.csv", "salary\n5000\n");
    let event = s3_event(&[]);

    match handle_event(&store, &event, &config()).await {
        Err(SalaryFilterError::Event(_)) => {}
        other => panic!("expected an event error, got {:?}", other),
    }
    assert_eq!(0, store.write_count());
}

#[tokio::test]
async fn fetch_failure_is_propagated() {
    let store = MemoryObjectStore::new();
    let event = s3_event(&[(INPUT_BUCKET, "data/missing.csv")]);

    match handle_event(&store, &event, &config()).await {
        Err(SalaryFilterError::AWS(msg)) => assert!(msg.contains("NoSuchKey")),
        other => panic!("expected an AWS error, got {:?}", other),
    }
    assert_eq!(0, store.write_count());
}

#[tokio::test]
async fn store_failure_is_propagated() {
    let store = ReadOnlyStore::default();
    store
        .inner
        .insert(INPUT_BUCKET, "data/input.csv", "salary\n5000\n", "text/csv");
    let event = s3_event(&[(INPUT_BUCKET, "data/input.csv")]);

    match handle_event(&store, &event, &config()).await {
        Err(SalaryFilterError::AWS(msg)) => assert!(msg.contains("AccessDenied")),
        other => panic!("expected an AWS error, got {:?}", other),
    }
}

#[tokio::test]
async fn source_object_is_untouched() -> Result<()> {
    let input = "Nombre,Sueldos\nAna,\"12,000\"\n";
    let store = store_with("hr/2024 payroll.csv", input);
    let event = s3_event(&[(INPUT_BUCKET, "hr/2024+payroll.csv")]);

    let report = handle_event(&store, &event, &config()).await?;
    assert_eq!(
        Report::Success {
            output_key: "hr/filtered/2024 payroll.csv".to_owned(),
        },
        report
    );
    assert_eq!(
        input.as_bytes().to_vec(),
        store.get(INPUT_BUCKET, "hr/2024 payroll.csv").await?
    );
    assert_eq!(vec!["hr/2024 payroll.csv".to_owned()], store.keys(INPUT_BUCKET));
    Ok(())
}

#[test]
fn random_tables_respect_the_threshold() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(0x5a1a_4e5);
    for _ in 0..50 {
        let rows = rng.gen_range(1..40);
        let mut body = String::from("Employee,Income\n");
        let mut expected = 0;
        for i in 0..rows {
            let cell = match rng.gen_range(0..4) {
                0 => String::new(),
                1 => "n/a".to_owned(),
                _ => {
                    let salary = rng.gen_range(0..3000);
                    if salary > 1000 {
                        expected += 1;
                    }
                    salary.to_string()
                }
            };
            body.push_str(&format!("p{},{}\n", i, cell));
        }

        match filter_csv(body.as_bytes())? {
            FilterOutcome::Filtered {
                total_rows,
                entries,
                ..
            } => {
                assert_eq!(rows, total_rows);
                assert_eq!(expected, entries.len());
                assert!(entries.len() <= total_rows);
                assert!(entries.iter().all(|e| e.salary > 1000.0));
                assert!(entries.iter().all(|e| e.name.is_some()));
            }
            FilterOutcome::NoResults { total_rows } => {
                assert_eq!(rows, total_rows);
                assert_eq!(0, expected);
            }
            FilterOutcome::Empty => unreachable!("every table has data rows"),
        }
    }
    Ok(())
}
