//! HTTP server layer for Presign Gateway.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │           POST /presign   DELETE /delete   GET /health          │
//! │                                                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────────┐  │
//! │  │  handlers   │  │    auth     │  │        routes           │  │
//! │  │ (requests)  │  │  (API key)  │  │  (router config)        │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod handlers;
pub mod routes;

pub use auth::{auth_middleware, extract_token, ApiKeyAuth, AuthError, BEARER_PREFIX};
pub use handlers::{
    delete_handler, health_handler, presign_handler, AppState, DeleteResponse, ErrorResponse,
    HealthResponse, KeyBody, PresignResponse, INVALID_KEY_MESSAGE,
};
pub use routes::{create_router, RouterConfig};
