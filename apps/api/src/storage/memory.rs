//! In-memory `ObjectStore` used by tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;

use crate::storage::{ObjectStore, StorageError, StoredObject};

#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<BTreeMap<(String, String), Bytes>>,
    calls: AtomicUsize,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of calls that reached the store, reads included.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn put(&self, bucket: &str, key: &str, body: impl Into<Bytes>) {
        self.objects
            .lock()
            .expect("object store lock poisoned")
            .insert((bucket.to_string(), key.to_string()), body.into());
    }

    pub fn keys(&self, bucket: &str) -> Vec<String> {
        self.objects
            .lock()
            .expect("object store lock poisoned")
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, k)| k.clone())
            .collect()
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        _content_type: &str,
    ) -> Result<(), StorageError> {
        self.touch();
        self.put(bucket, key, body);
        Ok(())
    }

    async fn download(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError> {
        self.touch();
        self.objects
            .lock()
            .expect("object store lock poisoned")
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<StoredObject>, StorageError> {
        self.touch();
        let now = Utc::now();
        // Keys embed a millisecond timestamp, so reverse key order is newest first.
        let mut objects: Vec<StoredObject> = self
            .objects
            .lock()
            .expect("object store lock poisoned")
            .iter()
            .filter(|((b, k), _)| b == bucket && k.starts_with(prefix))
            .map(|((_, k), v)| StoredObject {
                key: k.clone(),
                size: v.len() as i64,
                last_modified: Some(now),
            })
            .collect();
        objects.reverse();
        Ok(objects)
    }

    async fn delete(&self, bucket: &str, keys: &[String]) -> Result<(), StorageError> {
        self.touch();
        let mut objects = self.objects.lock().expect("object store lock poisoned");
        for key in keys {
            objects.remove(&(bucket.to_string(), key.clone()));
        }
        Ok(())
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("https://storage.test/{bucket}/{key}")
    }
}
