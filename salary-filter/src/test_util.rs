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


//! Common unit test utility methods

use aws_lambda_events::event::s3::S3Event;
use serde_json::{json, Value};

/// Generate an S3 `ObjectCreated:Put` notification record.
///
/// The record follows the shape S3 delivers to Lambda:
///
/// ```json
/// {
///     "eventVersion": "2.1",
///     "eventSource": "aws:s3",
///     "awsRegion": "us-east-1",
///     "eventTime": "2019-09-03T19:37:27.192Z",
///     "eventName": "ObjectCreated:Put",
///     "userIdentity": { "principalId": "AWS:AIDAINPONIXQXHT3IKHL2" },
///     "requestParameters": { "sourceIPAddress": "205.255.255.255" },
///     "responseElements": { "x-amz-request-id": "D82B88E5F771F645" },
///     "s3": {
///         "s3SchemaVersion": "1.0",
///         "configurationId": "828aa6fc-f7b5-4305-8584-487c791949c1",
///         "bucket": {
///             "name": "input-bucket",
///             "ownerIdentity": { "principalId": "A3I5XTEXAMAI3E" },
///             "arn": "arn:aws:s3:::input-bucket"
///         },
///         "object": {
///             "key": "data/input.csv",
///             "size": 1305107,
///             "eTag": "b21b84d653bb07b05b1e6b33684dc11b",
///             "sequencer": "0C0F6F405D6ED209E1"
///         }
///     }
/// }
/// ```
///
/// # Arguments
///
/// * `bucket`: the source bucket name.
/// * `key`: the object key, already form-encoded as S3 sends it.
pub fn s3_event_record(bucket: &str, key: &str) -> Value {
    json!({
        "eventVersion": "2.1",
        "eventSource": "aws:s3",
        "awsRegion": "us-east-1",
        "eventTime": "2019-09-03T19:37:27.192Z",
        "eventName": "ObjectCreated:Put",
        "userIdentity": { "principalId": "AWS:AIDAINPONIXQXHT3IKHL2" },
        "requestParameters": { "sourceIPAddress": "205.255.255.255" },
        "responseElements": {
            "x-amz-request-id": "D82B88E5F771F645",
            "x-amz-id-2": "vlR7PnpV2Ce81l0PRw6jlUpck7Jo5ZsQjryTjKlc5aLWGVHPZLj5NeC6qMa0emYBDXOo6QBU0Wo="
        },
        "s3": {
            "s3SchemaVersion": "1.0",
            "configurationId": "828aa6fc-f7b5-4305-8584-487c791949c1",
            "bucket": {
                "name": bucket,
                "ownerIdentity": { "principalId": "A3I5XTEXAMAI3E" },
                "arn": format!("arn:aws:s3:::{}", bucket)
            },
            "object": {
                "key": key,
                "size": 1305107,
                "eTag": "b21b84d653bb07b05b1e6b33684dc11b",
                "sequencer": "0C0F6F405D6ED209E1"
            }
        }
    })
}

/// Generate an S3 notification as a JSON [value](serde_json::Value), one
/// record per (bucket, key) pair.
pub fn s3_event_value(objects: &[(&str, &str)]) -> Value {
    json!({
        "Records": objects
            .iter()
            .map(|(bucket, key)| s3_event_record(bucket, key))
            .collect::<Vec<_>>()
    })
}

/// Generate a typed S3 notification, one record per (bucket, key) pair.
pub fn s3_event(objects: &[(&str, &str)]) -> S3Event {
    serde_json::from_value(s3_event_value(objects)).expect("sample S3 event deserializes")
}
