//! Configuration management for Presign Gateway.
//!
//! Every option can be given on the command line or through an environment
//! variable. A `.env` file in the working directory is loaded before parsing,
//! so deployments that ship an env file keep working.
//!
//! # Example
//!
//! ```ignore
//! use presign_gateway::config::Config;
//!
//! let config = Config::parse();
//! config.validate()?;
//! println!("Listening on {}", config.bind_address());
//! ```
//!
//! # Environment Variables
//!
//! - `PRESIGN_API_KEY` - Shared secret callers present as a bearer token (required)
//! - `PRESIGN_EXPIRY_SECONDS` - Presigned URL lifetime (default: 604800, max: 604800)
//! - `PRESIGN_BACKEND_TIMEOUT_SECONDS` - Timeout for each storage call (default: 30)
//! - `PRESIGN_PUBLIC_HEALTH` - Serve `/health` without authentication (default: false)
//! - `PRESIGN_CORS_ORIGINS` - Allowed CORS origins, comma-separated (default: any)
//! - `S3_BUCKET` - Target bucket (required)
//! - `S3_REGION` - AWS region (default: us-east-1)
//! - `S3_ENDPOINT` - Custom endpoint for S3-compatible services
//! - `S3_FORCE_PATH_STYLE` - Use path-style bucket addressing (default: false)
//! - `S3_ACCESS_KEY_ID` / `S3_SECRET_ACCESS_KEY` - Static credentials
//! - `HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listening port (default: 3000)

use std::time::Duration;

use clap::Parser;

use crate::object::MAX_PRESIGN_EXPIRY;
use crate::server::RouterConfig;
use crate::store::S3Settings;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default AWS region.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Default presigned URL lifetime in seconds (7 days).
pub const DEFAULT_EXPIRY_SECONDS: u64 = 604_800;

/// Default storage call timeout in seconds.
pub const DEFAULT_BACKEND_TIMEOUT_SECONDS: u64 = 30;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Presign Gateway - Authenticated presigned URLs for S3 objects.
///
/// Issues time-limited signed GET URLs and forwards delete requests to an
/// S3 or S3-compatible bucket. All endpoints require a bearer token.
#[derive(Parser, Debug, Clone)]
#[command(name = "presign-gateway")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "PORT")]
    pub port: u16,

    // =========================================================================
    // Authentication Configuration
    // =========================================================================
    /// Shared secret callers must present in the Authorization header.
    ///
    /// The server refuses to start without it.
    #[arg(long, env = "PRESIGN_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Serve /health without authentication.
    ///
    /// By default the health check sits behind the same gate as every other
    /// endpoint.
    #[arg(long, default_value_t = false, env = "PRESIGN_PUBLIC_HEALTH")]
    pub public_health: bool,

    // =========================================================================
    // Presigning Configuration
    // =========================================================================
    /// Lifetime of issued presigned URLs in seconds (1-604800).
    #[arg(long, default_value_t = DEFAULT_EXPIRY_SECONDS, env = "PRESIGN_EXPIRY_SECONDS")]
    pub expiry_seconds: u64,

    /// Timeout in seconds for each call to the storage backend.
    #[arg(
        long = "backend-timeout",
        default_value_t = DEFAULT_BACKEND_TIMEOUT_SECONDS,
        env = "PRESIGN_BACKEND_TIMEOUT_SECONDS"
    )]
    pub backend_timeout_seconds: u64,

    // =========================================================================
    // S3 Configuration
    // =========================================================================
    /// S3 bucket holding the objects.
    #[arg(long, env = "S3_BUCKET")]
    pub s3_bucket: Option<String>,

    /// AWS region for S3.
    #[arg(long, default_value = DEFAULT_REGION, env = "S3_REGION")]
    pub s3_region: String,

    /// Custom S3 endpoint URL for S3-compatible services (MinIO, etc.).
    ///
    /// If not specified, uses the default AWS S3 endpoint.
    #[arg(long, env = "S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    /// Use path-style addressing (endpoint/bucket/key).
    #[arg(long, default_value_t = false, env = "S3_FORCE_PATH_STYLE")]
    pub s3_force_path_style: bool,

    /// Access key ID. Without it the default AWS credential chain is used.
    #[arg(long, env = "S3_ACCESS_KEY_ID")]
    pub s3_access_key_id: Option<String>,

    /// Secret access key.
    #[arg(long, env = "S3_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub s3_secret_access_key: Option<String>,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "PRESIGN_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if is_blank(self.api_key.as_deref()) {
            return Err("PRESIGN_API_KEY is required. Set --api-key or PRESIGN_API_KEY".to_string());
        }

        if is_blank(self.s3_bucket.as_deref()) {
            return Err("S3_BUCKET is required. Set --s3-bucket or S3_BUCKET".to_string());
        }

        if self.expiry_seconds == 0 || self.expiry_seconds > MAX_PRESIGN_EXPIRY.as_secs() {
            return Err(format!(
                "expiry_seconds must be between 1 and {} (7 days)",
                MAX_PRESIGN_EXPIRY.as_secs()
            ));
        }

        if self.backend_timeout_seconds == 0 {
            return Err("backend_timeout must be greater than 0".to_string());
        }

        let has_key_id = !is_blank(self.s3_access_key_id.as_deref());
        let has_secret = !is_blank(self.s3_secret_access_key.as_deref());
        if has_key_id != has_secret {
            return Err(
                "S3_ACCESS_KEY_ID and S3_SECRET_ACCESS_KEY must be set together".to_string(),
            );
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the API key, or an empty string if unset (call validate() first).
    pub fn api_key_or_empty(&self) -> &str {
        self.api_key.as_deref().unwrap_or("")
    }

    /// Get the bucket name, or an empty string if unset (call validate() first).
    pub fn bucket_or_empty(&self) -> &str {
        self.s3_bucket.as_deref().unwrap_or("")
    }

    /// Presigned URL lifetime.
    pub fn presign_expiry(&self) -> Duration {
        Duration::from_secs(self.expiry_seconds)
    }

    /// Timeout applied to each storage call.
    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_seconds)
    }

    /// S3 client settings derived from this configuration.
    ///
    /// Blank endpoint and credential values count as unset, so an exported
    /// but empty variable falls back to the AWS defaults.
    pub fn s3_settings(&self) -> S3Settings {
        S3Settings {
            region: self.s3_region.clone(),
            endpoint: non_blank(&self.s3_endpoint),
            force_path_style: self.s3_force_path_style,
            access_key_id: non_blank(&self.s3_access_key_id),
            secret_access_key: non_blank(&self.s3_secret_access_key),
        }
    }

    /// Router settings derived from this configuration.
    pub fn router_config(&self) -> RouterConfig {
        let mut router_config = RouterConfig::new(self.api_key_or_empty())
            .with_public_health(self.public_health)
            .with_tracing(!self.no_tracing);

        if let Some(ref origins) = self.cors_origins {
            router_config = router_config.with_cors_origins(origins.clone());
        }

        router_config
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map(|v| v.trim().is_empty()).unwrap_or(true)
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

// =============================================================================
// Tests
// =============================================================================
