//! # Presign Gateway
//!
//! An authenticated HTTP gateway that issues time-limited presigned URLs for
//! objects in S3-compatible storage and forwards delete requests to it.
//!
//! Signing is done by the S3 client library; this crate validates the
//! caller's bearer token and the request body, then delegates.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`server`] - Axum-based HTTP server, auth gate and routes
//! - [`object`] - Object key validation and the storage-facing service
//! - [`store`] - Object store trait and the S3 implementation
//! - [`config`] - CLI and configuration types
//! - [`error`] - Error types shared across layers
//!
//! ## Example
//!
//! ```rust,no_run
//! use presign_gateway::{create_router, create_s3_client, ObjectService, RouterConfig, S3ObjectStore, S3Settings};
//!
//! #[tokio::main]
//! async fn main() {
//!     let settings = S3Settings {
//!         region: "us-east-1".to_string(),
//!         ..Default::default()
//!     };
//!     let client = create_s3_client(&settings).await;
//!     let service = ObjectService::new(S3ObjectStore::new(client, "my-bucket"));
//!     let router = create_router(service, RouterConfig::new("my-api-key"));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod object;
pub mod server;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use error::{KeyError, Operation, ServiceError, StorageError};
pub use object::{ObjectKey, ObjectService, PresignedUrl};
pub use server::{create_router, ApiKeyAuth, AppState, AuthError, ErrorResponse, RouterConfig};
pub use store::{create_s3_client, ObjectStore, S3ObjectStore, S3Settings};
