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


//! This crate contains the wrapped functions of the AWS S3 service.

use crate::configs::*;
use crate::error::{Result, SalaryFilterError};
use rusoto_core::ByteStream;
use rusoto_s3::{GetObjectRequest, PutObjectRequest, S3};
use tokio::io::AsyncReadExt;

/// Puts an object to AWS S3. If the object exists, it is overwritten.
///
/// # Arguments
/// * `bucket` - The name of the bucket to put the object in.
/// * `key` - The key of the object to put.
/// * `body` - The body of the object to put.
/// * `content_type` - The content type of the object to put, e.g. `text/csv`.
pub async fn put_object_with_content_type(
    bucket: &str,
    key: &str,
    body: Vec<u8>,
    content_type: &str,
) -> Result<()> {
    FILTER_S3_CLIENT
        .put_object(PutObjectRequest {
            bucket: bucket.to_owned(),
            key: key.to_owned(),
            body: Some(ByteStream::from(body)),
            content_type: Some(content_type.to_owned()),
            ..Default::default()
        })
        .await
        .map_err(|e| SalaryFilterError::AWS(e.to_string()))
        .map(|_| ())
}

/// Gets object from AWS S3.
///
/// # Arguments
/// * `bucket` - The name of the bucket to get the object from.
/// * `key` - The key of the object to get.
///
/// # Returns
/// The body of the object. An object without a body yields an empty vector.
pub async fn get_object(bucket: &str, key: &str) -> Result<Vec<u8>> {
    let body = FILTER_S3_CLIENT
        .get_object(GetObjectRequest {
            bucket: bucket.to_owned(),
            key: key.to_owned(),
            ..Default::default()
        })
        .await
        .map_err(|e| SalaryFilterError::AWS(e.to_string()))?
        .body;

    let mut buf = Vec::new();
    if let Some(body) = body {
        body.into_async_read()
            .read_to_end(&mut buf)
            .await
            .map_err(|e| SalaryFilterError::AWS(format!("failed to read object body: {}", e)))?;
    }
    Ok(buf)
}
