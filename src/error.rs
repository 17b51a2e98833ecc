use std::time::Duration;

use thiserror::Error;

/// Errors returned by the object storage backend
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// Error reported by S3 or an S3-compatible service
    #[error("{message}")]
    Backend {
        /// Error code reported by the service, if any (e.g. "AccessDenied")
        code: Option<String>,
        /// Message surfaced to callers (may be empty)
        message: String,
    },

    /// Network or connection error before a response was received
    #[error("{0}")]
    Connection(String),

    /// The presigning parameters were rejected by the client library
    #[error("Invalid presigning configuration: {0}")]
    Presigning(String),

    /// The backend did not answer within the configured timeout
    #[error("Storage request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

impl StorageError {
    /// Create a backend error without an error code.
    pub fn backend(message: impl Into<String>) -> Self {
        StorageError::Backend {
            code: None,
            message: message.into(),
        }
    }
}

/// Errors produced while validating an object key from a request body
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// Request body was empty or not valid JSON
    #[error("Request body is not valid JSON")]
    MalformedBody,

    /// The `key` field is absent or null
    #[error("Missing \"key\" field")]
    Missing,

    /// The `key` field is present but not a string
    #[error("\"key\" must be a string")]
    NotAString,

    /// The key is empty once surrounding whitespace is removed
    #[error("\"key\" must not be empty")]
    Empty,
}

/// The storage operation a service error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Presign,
    Delete,
}

impl Operation {
    /// Message returned to callers when the backend error carries none.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Operation::Presign => "Failed to generate presigned URL",
            Operation::Delete => "Failed to delete file",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Presign => write!(f, "presign"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

/// A storage failure tagged with the operation that triggered it
#[derive(Debug, Clone, Error)]
#[error("{operation} failed for key {key:?}: {source}")]
pub struct ServiceError {
    pub operation: Operation,
    pub key: String,
    #[source]
    pub source: StorageError,
}

impl ServiceError {
    /// Message safe to return to the caller: the backend message, or a
    /// per-operation fallback when the backend gave none.
    pub fn client_message(&self) -> String {
        let message = self.source.to_string();
        if message.trim().is_empty() {
            self.operation.fallback_message().to_string()
        } else {
            message
        }
    }
}
