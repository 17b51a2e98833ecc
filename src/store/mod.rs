//! Object storage abstraction.
//!
//! The gateway never talks to S3 directly; handlers go through the
//! [`ObjectStore`] trait so the HTTP layer can be exercised against an
//! in-memory store in tests.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             ObjectService               │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │           ObjectStore Trait             │
//! │   (presign GET, delete, bucket name)    │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │            S3ObjectStore                │
//! │        (aws-sdk-s3 client)              │
//! └─────────────────────────────────────────┘
//! ```

mod s3;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::StorageError;

pub use s3::{create_s3_client, S3ObjectStore, S3Settings};

/// Trait for the operations the gateway delegates to object storage.
///
/// Implementations are bound to a single bucket and must be safe to share
/// across concurrent requests.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Name of the bucket this store operates on.
    fn bucket(&self) -> &str;

    /// Produce a signed GET URL for `key`, valid for `expires_in`.
    ///
    /// Signing happens locally; no request is made for the object itself,
    /// so a URL is returned whether or not the object exists.
    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, StorageError>;

    /// Delete the object stored under `key`.
    async fn delete_object(&self, key: &str) -> Result<(), StorageError>;
}
