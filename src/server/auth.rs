//! Bearer token authentication for Presign Gateway.
//!
//! Every protected request must carry the shared API key in the
//! `Authorization` header, either with the `Bearer` scheme or bare:
//!
//! ```text
//! Authorization: Bearer <api-key>
//! Authorization: <api-key>
//! ```
//!
//! The scheme prefix is matched case-sensitively. Tokens are compared with
//! the configured key in constant time.
//!
//! # Example
//!
//! ```rust
//! use presign_gateway::server::auth::ApiKeyAuth;
//!
//! let auth = ApiKeyAuth::new("my-secret-key");
//!
//! assert!(auth.verify_header(Some("Bearer my-secret-key")).is_ok());
//! assert!(auth.verify_header(Some("my-secret-key")).is_ok());
//! assert!(auth.verify_header(Some("bearer my-secret-key")).is_err());
//! assert!(auth.verify_header(None).is_err());
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use super::handlers::ErrorResponse;

// =============================================================================
// Types
// =============================================================================

/// Scheme prefix stripped from the header value when present.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Authentication error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No Authorization header, or an empty token
    MissingCredential,

    /// Authorization header is not valid UTF-8
    MalformedHeader,

    /// Token does not match the configured API key
    InvalidCredential,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingCredential => write!(f, "Missing credential"),
            AuthError::MalformedHeader => write!(f, "Malformed Authorization header"),
            AuthError::InvalidCredential => write!(f, "Invalid credential"),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = StatusCode::UNAUTHORIZED;

        // A wrong token may be someone probing the key; missing ones are
        // usually misconfigured clients.
        match &self {
            AuthError::InvalidCredential => {
                warn!(status = status.as_u16(), "Authentication failed: {}", self);
            }
            _ => {
                debug!(status = status.as_u16(), "Authentication failed: {}", self);
            }
        }

        let error_response =
            ErrorResponse::new("Unauthorized", "Valid Authorization header required");
        (status, Json(error_response)).into_response()
    }
}

// =============================================================================
// API Key Authentication
// =============================================================================

/// Shared-secret authenticator.
#[derive(Clone)]
pub struct ApiKeyAuth {
    api_key: Arc<[u8]>,
}

impl ApiKeyAuth {
    /// Create an authenticator for the given API key.
    pub fn new(api_key: impl AsRef<[u8]>) -> Self {
        Self {
            api_key: Arc::from(api_key.as_ref()),
        }
    }

    /// Verify a raw `Authorization` header value.
    pub fn verify_header(&self, header: Option<&str>) -> Result<(), AuthError> {
        let token = header
            .map(extract_token)
            .ok_or(AuthError::MissingCredential)?;

        if token.is_empty() {
            return Err(AuthError::MissingCredential);
        }

        self.verify_token(token)
    }

    /// Compare a token with the API key in constant time.
    pub fn verify_token(&self, token: &str) -> Result<(), AuthError> {
        // Slices of different length compare unequal without leaking where
        // they differ.
        if token.as_bytes().ct_eq(&self.api_key[..]).into() {
            Ok(())
        } else {
            Err(AuthError::InvalidCredential)
        }
    }
}

/// Strip the `Bearer ` prefix if present; otherwise the whole value is the token.
pub fn extract_token(header: &str) -> &str {
    header.strip_prefix(BEARER_PREFIX).unwrap_or(header)
}

// =============================================================================
// Axum Middleware
// =============================================================================

/// Axum middleware rejecting requests without a valid API key.
///
/// Runs before routing-specific handlers, so a rejected request never
/// reaches the storage backend.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, middleware};
/// use presign_gateway::server::auth::{ApiKeyAuth, auth_middleware};
///
/// let auth = ApiKeyAuth::new("secret-key");
/// let app = Router::new()
///     .route("/presign", post(presign_handler))
///     .layer(middleware::from_fn_with_state(auth, auth_middleware));
/// ```
pub async fn auth_middleware(
    State(auth): State<ApiKeyAuth>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header = match request.headers().get(AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| AuthError::MalformedHeader)?),
        None => None,
    };

    auth.verify_header(header)?;

    Ok(next.run(request).await)
}

// =============================================================================
// Tests
// =============================================================================
