//! HTTP request handlers for the Presign Gateway API.
//!
//! # Endpoints
//!
//! - `POST /presign` - Issue a presigned GET URL for an object
//! - `DELETE /delete` - Delete an object
//! - `GET /health` - Health check endpoint

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{KeyError, ServiceError};
use crate::object::{ObjectKey, ObjectService};
use crate::store::ObjectStore;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the object service.
///
/// This is passed to all handlers via Axum's State extractor.
pub struct AppState<S: ObjectStore> {
    /// The service performing storage calls on behalf of handlers
    pub object_service: Arc<ObjectService<S>>,
}

impl<S: ObjectStore> AppState<S> {
    /// Create a new application state with the given object service.
    pub fn new(object_service: ObjectService<S>) -> Self {
        Self {
            object_service: Arc::new(object_service),
        }
    }
}

impl<S: ObjectStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            object_service: Arc::clone(&self.object_service),
        }
    }
}

// =============================================================================
// Request Types
// =============================================================================

/// Extractor yielding the validated object key from a JSON request body.
///
/// The `Content-Type` header is not checked; any body that parses as a JSON
/// object with a string `key` is accepted.
#[derive(Debug)]
pub struct KeyBody(pub ObjectKey);

impl<S> FromRequest<S> for KeyBody
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        ObjectKey::from_json_body(&body)
            .map(KeyBody)
            .map_err(IntoResponse::into_response)
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error category label (e.g., "Bad Request", "Unauthorized")
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

/// Response from the presign endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct PresignResponse {
    /// Presigned GET URL
    pub url: String,
}

/// Response from the delete endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Always true; failures use [`ErrorResponse`]
    pub success: bool,

    /// Human-readable confirmation naming the deleted key
    pub message: String,

    /// The trimmed key that was deleted
    pub key: String,
}

impl DeleteResponse {
    fn deleted(key: ObjectKey) -> Self {
        Self {
            success: true,
            message: format!("File \"{}\" deleted successfully", key),
            key: key.into_string(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Message returned for every invalid request body.
pub const INVALID_KEY_MESSAGE: &str = "Body must include \"key\" (object key path)";

/// Convert KeyError to HTTP response.
///
/// All validation failures share one message; the precise reason is logged.
impl IntoResponse for KeyError {
    fn into_response(self) -> Response {
        let status = StatusCode::BAD_REQUEST;

        debug!(
            status = status.as_u16(),
            reason = %self,
            "Client error: invalid object key"
        );

        let error_response = ErrorResponse::new("Bad Request", INVALID_KEY_MESSAGE);
        (status, Json(error_response)).into_response()
    }
}

/// Convert ServiceError to HTTP response.
///
/// Every storage failure becomes a 500, whatever its cause. The full error
/// is logged; the caller receives the backend message or a fallback.
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;

        error!(
            status = status.as_u16(),
            operation = %self.operation,
            key = %self.key,
            error = ?self.source,
            "Server error: {}",
            self
        );

        let error_response = ErrorResponse::new("Internal Server Error", self.client_message());
        (status, Json(error_response)).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle presign requests.
///
/// # Endpoint
///
/// `POST /presign`
///
/// # Request Body
///
/// ```json
/// { "key": "path/to/object.pdf" }
/// ```
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// { "url": "https://bucket.s3.amazonaws.com/path/to/object.pdf?X-Amz-..." }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing or non-string `key`
/// - `401 Unauthorized`: Invalid or missing credential
/// - `500 Internal Server Error`: Storage error
pub async fn presign_handler<S: ObjectStore>(
    State(state): State<AppState<S>>,
    KeyBody(key): KeyBody,
) -> Result<Json<PresignResponse>, ServiceError> {
    let presigned = state.object_service.presign(&key).await?;

    Ok(Json(PresignResponse { url: presigned.url }))
}

/// Handle delete requests.
///
/// # Endpoint
///
/// `DELETE /delete`
///
/// # Request Body
///
/// ```json
/// { "key": "path/to/object.pdf" }
/// ```
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "success": true,
///   "message": "File \"path/to/object.pdf\" deleted successfully",
///   "key": "path/to/object.pdf"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing or non-string `key`
/// - `401 Unauthorized`: Invalid or missing credential
/// - `500 Internal Server Error`: Storage error
pub async fn delete_handler<S: ObjectStore>(
    State(state): State<AppState<S>>,
    KeyBody(key): KeyBody,
) -> Result<Json<DeleteResponse>, ServiceError> {
    state.object_service.delete(&key).await?;

    Ok(Json(DeleteResponse::deleted(key)))
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body `{"ok": true}`. The storage backend is not
/// contacted.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}
