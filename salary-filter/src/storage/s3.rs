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


//! Use AWS S3 as the object store of the salary filter.

use super::ObjectStore;
use crate::aws::s3;
use crate::error::Result;
use async_trait::async_trait;

/// S3ObjectStore reads and writes objects in Amazon S3.
#[derive(Default, Debug, Clone)]
pub struct S3ObjectStore {}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn name(&self) -> String {
        "S3ObjectStore".to_string()
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        s3::get_object(bucket, key).await
    }

    async fn put(&self, bucket: &str, key: &str, body: Vec<u8>, content_type: &str) -> Result<()> {
        s3::put_object_with_content_type(bucket, key, body, content_type).await
    }
}

impl S3ObjectStore {
    /// Creates a new S3ObjectStore.
    pub fn new() -> Self {
        Self {}
    }
}
