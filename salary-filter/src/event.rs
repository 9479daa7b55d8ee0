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


//! Decoding of the S3 object-creation notifications that trigger the filter.

use crate::error::{Result, SalaryFilterError};
use aws_lambda_events::event::s3::S3Event;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use url::form_urlencoded;

/// A stored document, identified by its bucket and key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    /// The bucket name.
    pub bucket: String,
    /// The object key.
    pub key:    String,
}

impl ObjectRef {
    /// Creates a new object reference.
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key:    key.into(),
        }
    }
}

impl Display for ObjectRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

/// Decodes an object key as it appears in an S3 notification.
///
/// S3 form-encodes keys in event payloads: a space arrives as `+` and other
/// reserved characters as `%XX` escapes. Keys with a literal `&` or `=` were
/// not encoded and are returned unchanged.
pub fn decode_object_key(raw: &str) -> String {
    if raw.contains(|c: char| c == '&' || c == '=') {
        return raw.to_owned();
    }
    form_urlencoded::parse(raw.as_bytes())
        .next()
        .map(|(key, _)| key.into_owned())
        .unwrap_or_default()
}

/// Returns the object named by the first record of the notification.
///
/// Additional records are ignored.
pub fn source_object(event: &S3Event) -> Result<ObjectRef> {
    let record = event
        .records
        .first()
        .ok_or_else(|| SalaryFilterError::Event("the notification has no records".to_owned()))?;
    if event.records.len() > 1 {
        debug!(
            "The notification carries {} records; only the first is processed.",
            event.records.len()
        );
    }

    let bucket = record
        .s3
        .bucket
        .name
        .as_deref()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| SalaryFilterError::Event("the record has no bucket name".to_owned()))?;
    let key = record
        .s3
        .object
        .key
        .as_deref()
        .map(decode_object_key)
        .filter(|key| !key.is_empty())
        .ok_or_else(|| SalaryFilterError::Event("the record has no object key".to_owned()))?;

    Ok(ObjectRef::new(bucket, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::*;

    #[test]
    fn key_decoding() {
        assert_eq!("data/input.csv", decode_object_key("data/input.csv"));
        assert_eq!("hr/May payroll.csv", decode_object_key("hr/May+payroll.csv"));
        assert_eq!("a+b/ñ.csv", decode_object_key("a%2Bb/%C3%B1.csv"));
        assert_eq!("x=1&y.csv", decode_object_key("x=1&y.csv"));
    }

    #[test]
    fn first_record_is_honored() -> Result<()> {
        let event = s3_event(&[("input-bucket", "data/input.csv"), ("other", "other.csv")]);
        assert_eq!(
            ObjectRef::new("input-bucket", "data/input.csv"),
            source_object(&event)?
        );
        Ok(())
    }

    #[test]
    fn encoded_keys_are_decoded() -> Result<()> {
        let event = s3_event(&[("input-bucket", "uploads/Q1+salaries%281%29.csv")]);
        assert_eq!("uploads/Q1 salaries(1).csv", source_object(&event)?.key);
        Ok(())
    }

    #[test]
    fn empty_notification() {
        let event = s3_event(&[]);
        match source_object(&event) {
            Err(SalaryFilterError::Event(msg)) => assert!(msg.contains("no records")),
            other => panic!("expected an event error, got {:?}", other),
        }
    }

    #[test]
    fn record_without_key() {
        let event = s3_event(&[("input-bucket", "")]);
        assert!(matches!(
            source_object(&event),
            Err(SalaryFilterError::Event(_))
        ));
    }

    #[test]
    fn display() {
        assert_eq!(
            "s3://input-bucket/data/input.csv",
            ObjectRef::new("input-bucket", "data/input.csv").to_string()
        );
    }
}
