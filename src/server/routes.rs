//! Router configuration for Presign Gateway.
//!
//! This module defines the HTTP routes and applies middleware for
//! authentication, CORS and request tracing.
//!
//! # Route Structure
//!
//! ```text
//! POST   /presign   - Issue a presigned URL (protected)
//! DELETE /delete    - Delete an object (protected)
//! GET    /health    - Health check (protected unless public_health is set)
//! ```
//!
//! Unknown paths fall through to a JSON 404, which is also behind the gate.
//!
//! # Example
//!
//! ```ignore
//! use presign_gateway::server::routes::{create_router, RouterConfig};
//! use presign_gateway::object::ObjectService;
//! use presign_gateway::store::S3ObjectStore;
//!
//! let service = ObjectService::new(S3ObjectStore::new(client, "my-bucket"));
//! let config = RouterConfig::new("my-api-key").with_public_health(true);
//! let router = create_router(service, config);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::time::Duration;

use axum::{
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use http::header::{ALLOW, AUTHORIZATION, CONTENT_TYPE};
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth::{auth_middleware, ApiKeyAuth};
use super::handlers::{delete_handler, health_handler, presign_handler, AppState, ErrorResponse};
use crate::object::ObjectService;
use crate::store::ObjectStore;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Clone)]
pub struct RouterConfig {
    /// Shared secret callers present as a bearer token
    pub api_key: String,

    /// Whether `/health` bypasses authentication
    pub public_health: bool,

    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a new router configuration with the given API key.
    ///
    /// By default:
    /// - `/health` requires authentication like every other route
    /// - CORS allows any origin
    /// - Tracing is enabled
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            public_health: false,
            cors_origins: None,
            enable_tracing: true,
        }
    }

    /// Serve `/health` without authentication.
    pub fn with_public_health(mut self, public: bool) -> Self {
        self.public_health = public;
        self
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Allow any CORS origin.
    pub fn with_cors_any_origin(mut self) -> Self {
        self.cors_origins = None;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// # Arguments
///
/// * `object_service` - The service handling storage calls
/// * `config` - Router configuration
///
/// # Returns
///
/// A configured Axum router ready to be served.
pub fn create_router<S>(object_service: ObjectService<S>, config: RouterConfig) -> Router
where
    S: ObjectStore,
{
    let app_state = AppState::new(object_service);
    let auth = ApiKeyAuth::new(&config.api_key);
    let cors = build_cors_layer(&config);

    let api_routes = Router::new()
        .route("/presign", post(presign_handler::<S>))
        .route("/delete", delete(delete_handler::<S>))
        .with_state(app_state);

    // The fallback is registered before the auth layer so unknown paths
    // are gated too.
    let router = if config.public_health {
        // Only GET /health is public; other methods on it still need a
        // credential before they learn the method is not allowed.
        let gated_method_not_allowed = Router::new()
            .fallback(method_not_allowed_handler)
            .layer(middleware::from_fn_with_state(auth.clone(), auth_middleware));

        let protected = api_routes
            .fallback(not_found_handler)
            .layer(middleware::from_fn_with_state(auth, auth_middleware));

        Router::new()
            .route(
                "/health",
                get(health_handler).fallback_service(gated_method_not_allowed),
            )
            .merge(protected)
    } else {
        api_routes
            .route("/health", get(health_handler))
            .fallback(not_found_handler)
            .layer(middleware::from_fn_with_state(auth, auth_middleware))
    };

    let router = router.layer(cors);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// JSON 404 for paths outside the API.
async fn not_found_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Not Found", "No such endpoint")),
    )
}

/// 405 for non-GET requests to a public `/health`.
async fn method_not_allowed_handler() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, [(ALLOW, "GET,HEAD")])
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .max_age(Duration::from_secs(86400)); // 24 hours

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => cors,
        Some(origins) => {
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
