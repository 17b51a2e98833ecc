//! Object key handling and the storage-facing service.
//!
//! # Components
//!
//! - [`ObjectKey`]: a validated, trimmed object key taken from a request body
//! - [`ObjectService`]: runs presign and delete calls against an
//!   [`ObjectStore`](crate::store::ObjectStore), bounding each call with a
//!   timeout and tagging failures with the operation that produced them
//! - [`PresignedUrl`]: the URL returned by a successful presign

mod key;
mod service;

pub use key::ObjectKey;
pub use service::{
    ObjectService, PresignedUrl, DEFAULT_BACKEND_TIMEOUT, DEFAULT_PRESIGN_EXPIRY,
    MAX_PRESIGN_EXPIRY,
};
