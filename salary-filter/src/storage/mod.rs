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


//! The salary filter reads its input document from one bucket and writes the
//! filtered document to another. Where those buckets live depends on the
//! chosen object store:
//!
//! - `S3ObjectStore`: the production backend. Objects are read from and
//!   written to AWS S3 through the process-wide rusoto client.
//!
//! - `MemoryObjectStore`: holds objects in a hash map in the process memory.
//!   It is used to run the transform locally and to observe every write in
//!   unit tests.

mod memory;
pub use memory::{MemoryObjectStore, StoredObject};

mod s3;
pub use s3::S3ObjectStore;

use crate::error::Result;
use async_trait::async_trait;
use std::fmt::Debug;

/// The object store trait defines the interface for object stores.
#[async_trait]
pub trait ObjectStore: Debug + Send + Sync {
    /// The type of the object store.
    fn name(&self) -> String;
    /// Reads the full body of an object.
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;
    /// Writes an object in full, overwriting any existing object at the key.
    async fn put(&self, bucket: &str, key: &str, body: Vec<u8>, content_type: &str) -> Result<()>;
}
