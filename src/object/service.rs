//! Object Service: the single boundary between HTTP handlers and storage.
//!
//! Every storage call made on behalf of a request goes through
//! [`ObjectService`], which:
//! - applies the configured presign expiry
//! - bounds the call with the backend timeout
//! - tags failures with the operation and key as a [`ServiceError`]
//!
//! Handlers only ever see `ServiceError`, which the server layer maps to a
//! single 500 response shape regardless of the underlying cause.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{Operation, ServiceError, StorageError};
use crate::store::ObjectStore;

use super::ObjectKey;

// =============================================================================
// Defaults
// =============================================================================

/// Default lifetime of a presigned URL (7 days).
pub const DEFAULT_PRESIGN_EXPIRY: Duration = Duration::from_secs(604_800);

/// Longest lifetime SigV4 query presigning allows (7 days).
pub const MAX_PRESIGN_EXPIRY: Duration = Duration::from_secs(604_800);

/// Default upper bound on a single storage call.
pub const DEFAULT_BACKEND_TIMEOUT: Duration = Duration::from_secs(30);

// =============================================================================
// Presigned URL
// =============================================================================

/// A signed GET URL for an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedUrl {
    pub url: String,
}

// =============================================================================
// Object Service
// =============================================================================

/// Service running presign and delete operations against a store.
///
/// # Type Parameters
///
/// * `S` - The object store implementation (e.g. [`S3ObjectStore`](crate::store::S3ObjectStore))
///
/// # Example
///
/// ```ignore
/// use presign_gateway::object::{ObjectKey, ObjectService};
///
/// let service = ObjectService::new(store);
/// let key = ObjectKey::new("reports/2024.pdf")?;
/// let presigned = service.presign(&key).await?;
/// println!("{}", presigned.url);
/// ```
pub struct ObjectService<S: ObjectStore> {
    store: S,
    presign_expiry: Duration,
    backend_timeout: Duration,
}

impl<S: ObjectStore> ObjectService<S> {
    /// Create a service with the default expiry and timeout.
    pub fn new(store: S) -> Self {
        Self::with_settings(store, DEFAULT_PRESIGN_EXPIRY, DEFAULT_BACKEND_TIMEOUT)
    }

    /// Create a service with an explicit presign expiry and backend timeout.
    pub fn with_settings(store: S, presign_expiry: Duration, backend_timeout: Duration) -> Self {
        Self {
            store,
            presign_expiry,
            backend_timeout,
        }
    }

    /// Get a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lifetime of the URLs produced by [`presign`](Self::presign).
    pub fn presign_expiry(&self) -> Duration {
        self.presign_expiry
    }

    /// Upper bound applied to each storage call.
    pub fn backend_timeout(&self) -> Duration {
        self.backend_timeout
    }

    /// Produce a presigned GET URL for `key`.
    pub async fn presign(&self, key: &ObjectKey) -> Result<PresignedUrl, ServiceError> {
        debug!(
            bucket = self.store.bucket(),
            key = key.as_str(),
            expiry_secs = self.presign_expiry.as_secs(),
            "Presigning object"
        );

        let url = self
            .bounded(
                Operation::Presign,
                key,
                self.store.presign_get(key.as_str(), self.presign_expiry),
            )
            .await?;

        info!(
            bucket = self.store.bucket(),
            key = key.as_str(),
            "Issued presigned URL"
        );

        Ok(PresignedUrl { url })
    }

    /// Delete the object stored under `key`.
    ///
    /// Deleting a key that does not exist is not treated specially; the
    /// result is whatever the store reports (S3 reports success).
    pub async fn delete(&self, key: &ObjectKey) -> Result<(), ServiceError> {
        debug!(
            bucket = self.store.bucket(),
            key = key.as_str(),
            "Deleting object"
        );

        self.bounded(
            Operation::Delete,
            key,
            self.store.delete_object(key.as_str()),
        )
        .await?;

        info!(bucket = self.store.bucket(), key = key.as_str(), "Deleted object");

        Ok(())
    }

    /// Await a storage call under the backend timeout, tagging any failure.
    async fn bounded<T, F>(
        &self,
        operation: Operation,
        key: &ObjectKey,
        call: F,
    ) -> Result<T, ServiceError>
    where
        F: Future<Output = Result<T, StorageError>>,
    {
        let result = match tokio::time::timeout(self.backend_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(StorageError::Timeout(self.backend_timeout)),
        };

        result.map_err(|source| ServiceError {
            operation,
            key: key.as_str().to_string(),
            source,
        })
    }
}
