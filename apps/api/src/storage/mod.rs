//! Storage: the seam in front of the managed object storage.
//!
//! Buckets hold uploaded résumés and generated documents. Every key starts
//! with the owning user's id, so a listing by prefix never crosses users.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::document::DocumentKind;

#[cfg(test)]
pub mod memory;
pub mod s3;

pub use s3::S3ObjectStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {0}")]
    NotFound(String),

    #[error("upload failed: {0}")]
    Upload(String),

    #[error("download failed: {0}")]
    Download(String),

    #[error("list failed: {0}")]
    List(String),

    #[error("delete failed: {0}")]
    Delete(String),
}

/// One object as returned by a prefix listing.
#[derive(Debug, Clone, Serialize)]
pub struct StoredObject {
    pub key: String,
    pub size: i64,
    pub last_modified: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError>;

    async fn download(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError>;

    /// Objects under `prefix`, most recently modified first.
    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<StoredObject>, StorageError>;

    async fn delete(&self, bucket: &str, keys: &[String]) -> Result<(), StorageError>;

    fn public_url(&self, bucket: &str, key: &str) -> String;
}

/// Prefix every object owned by `user_id` lives under.
pub fn user_prefix(user_id: Uuid) -> String {
    format!("{user_id}/")
}

/// True when `key` belongs to `user_id`.
pub fn is_owned_by(key: &str, user_id: Uuid) -> bool {
    key.starts_with(&user_prefix(user_id)) && !key.contains("..")
}

/// `{user}/{unix_millis}-{name}` for an uploaded résumé.
pub fn resume_key(user_id: Uuid, file_name: &str, at: DateTime<Utc>) -> String {
    format!(
        "{}{}-{}",
        user_prefix(user_id),
        at.timestamp_millis(),
        sanitize_file_name(file_name)
    )
}

/// `{user}/{job}/{kind}_{unix_millis}.txt` for a generated document.
pub fn document_key(user_id: Uuid, job_id: Uuid, kind: DocumentKind, at: DateTime<Utc>) -> String {
    format!(
        "{}{job_id}/{}_{}.txt",
        user_prefix(user_id),
        kind.file_stem(),
        at.timestamp_millis()
    )
}

/// Keeps the final path component and replaces anything outside
/// `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "resume.pdf".to_string()
    } else {
        cleaned.to_string()
    }
}
