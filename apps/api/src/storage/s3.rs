use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{Delete, Object, ObjectIdentifier};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::storage::{ObjectStore, StorageError, StoredObject};

/// Upper bound on keys in one `DeleteObjects` request.
const MAX_KEYS_PER_DELETE: usize = 1000;

/// `ObjectStore` over an S3-compatible bucket service.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
    public_base_url: String,
}

impl S3ObjectStore {
    pub fn new(client: aws_sdk_s3::Client, public_base_url: impl Into<String>) -> Self {
        Self {
            client,
            public_base_url: public_base_url.into(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let size = body.len();
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::Upload(e.to_string()))?;

        info!("Uploaded {size} bytes to s3://{bucket}/{key}");
        Ok(())
    }

    async fn download(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let not_found = e
                    .as_service_error()
                    .map(|se| se.is_no_such_key())
                    .unwrap_or(false);
                if not_found {
                    StorageError::NotFound(key.to_string())
                } else {
                    StorageError::Download(e.to_string())
                }
            })?;

        let data = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Download(e.to_string()))?;
        Ok(data.into_bytes())
    }

    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<StoredObject>, StorageError> {
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .prefix(prefix)
            .into_paginator()
            .send();

        let mut objects = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| StorageError::List(e.to_string()))?;
            objects.extend(page.contents().iter().filter_map(stored_object));
        }
        objects.sort_by(|a, b| b.last_modified.cmp(&a.last_modified).then(b.key.cmp(&a.key)));
        Ok(objects)
    }

    async fn delete(&self, bucket: &str, keys: &[String]) -> Result<(), StorageError> {
        for batch in delete_batches(keys)? {
            self.client
                .delete_objects()
                .bucket(bucket)
                .delete(batch)
                .send()
                .await
                .map_err(|e| StorageError::Delete(e.to_string()))?;
        }

        if !keys.is_empty() {
            info!("Deleted {} objects from s3://{bucket}", keys.len());
        }
        Ok(())
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!(
            "{}/{bucket}/{key}",
            self.public_base_url.trim_end_matches('/')
        )
    }
}

fn stored_object(object: &Object) -> Option<StoredObject> {
    let key = object.key()?.to_string();
    let last_modified = object
        .last_modified()
        .and_then(|t| DateTime::<Utc>::from_timestamp(t.secs(), t.subsec_nanos()));
    Some(StoredObject {
        key,
        size: object.size().unwrap_or(0),
        last_modified,
    })
}

/// Splits `keys` into `DeleteObjects` payloads the service will accept.
fn delete_batches(keys: &[String]) -> Result<Vec<Delete>, StorageError> {
    keys.chunks(MAX_KEYS_PER_DELETE)
        .map(|chunk| {
            let identifiers = chunk
                .iter()
                .map(|k| ObjectIdentifier::builder().key(k).build())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| StorageError::Delete(e.to_string()))?;
            Delete::builder()
                .set_objects(Some(identifiers))
                .build()
                .map_err(|e| StorageError::Delete(e.to_string()))
        })
        .collect()
}
