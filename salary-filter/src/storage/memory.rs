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


//! Use the process memory as the object store of the salary filter.

use super::ObjectStore;
use crate::error::{Result, SalaryFilterError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// An object held by the [`MemoryObjectStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// The object body.
    pub body:         Vec<u8>,
    /// The declared content type.
    pub content_type: String,
}

/// MemoryObjectStore keeps objects in a hash map keyed by (bucket, key).
#[derive(Default, Debug)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<(String, String), StoredObject>>,
    writes:  Mutex<usize>,
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    fn name(&self) -> String {
        "MemoryObjectStore".to_string()
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        self.objects
            .lock()
            .map_err(|_| SalaryFilterError::from("memory object store lock poisoned"))?
            .get(&(bucket.to_owned(), key.to_owned()))
            .map(|object| object.body.clone())
            .ok_or_else(|| {
                SalaryFilterError::AWS(format!(
                    "NoSuchKey: The specified key does not exist: s3://{}/{}",
                    bucket, key
                ))
            })
    }

    async fn put(&self, bucket: &str, key: &str, body: Vec<u8>, content_type: &str) -> Result<()> {
        self.objects
            .lock()
            .map_err(|_| SalaryFilterError::from("memory object store lock poisoned"))?
            .insert(
                (bucket.to_owned(), key.to_owned()),
                StoredObject {
                    body,
                    content_type: content_type.to_owned(),
                },
            );
        *self
            .writes
            .lock()
            .map_err(|_| SalaryFilterError::from("memory object store lock poisoned"))? += 1;
        Ok(())
    }
}

impl MemoryObjectStore {
    /// Creates an empty MemoryObjectStore.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an object without counting it as a write.
    pub fn insert(&self, bucket: &str, key: &str, body: impl Into<Vec<u8>>, content_type: &str) {
        if let Ok(mut objects) = self.objects.lock() {
            objects.insert(
                (bucket.to_owned(), key.to_owned()),
                StoredObject {
                    body:         body.into(),
                    content_type: content_type.to_owned(),
                },
            );
        }
    }

    /// Returns a copy of the object at (bucket, key), if any.
    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .ok()?
            .get(&(bucket.to_owned(), key.to_owned()))
            .cloned()
    }

    /// Returns the keys stored in `bucket`, sorted.
    pub fn keys(&self, bucket: &str) -> Vec<String> {
        let mut keys = self
            .objects
            .lock()
            .map(|objects| {
                objects
                    .keys()
                    .filter(|(b, _)| b == bucket)
                    .map(|(_, k)| k.clone())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        keys.sort();
        keys
    }

    /// The number of successful [`ObjectStore::put`] calls.
    pub fn write_count(&self) -> usize {
        self.writes.lock().map(|w| *w).unwrap_or_default()
    }
}
