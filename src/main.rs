//! Presign Gateway - presigned S3 URLs behind a shared API key.
//!
//! This binary loads configuration, builds the S3 client and starts the
//! HTTP server.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use presign_gateway::{
    config::Config, create_router, create_s3_client, ObjectService, S3ObjectStore,
};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; real environment variables still apply.
    let dotenv_result = dotenvy::dotenv();

    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = &dotenv_result {
        if !e.not_found() {
            warn!("Ignoring unreadable .env file: {}", e);
        }
    }

    run_serve(config).await
}

async fn run_serve(config: Config) -> ExitCode {
    // Validate configuration before touching the network
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let bucket = config.bucket_or_empty().to_string();
    let s3_settings = config.s3_settings();

    info!("Configuration:");
    info!("  S3 bucket: {}", bucket);
    info!("  S3 region: {}", config.s3_region);
    if let Some(ref endpoint) = s3_settings.endpoint {
        info!("  S3 endpoint: {}", endpoint);
    }
    info!("  S3 path-style: {}", config.s3_force_path_style);
    if s3_settings.access_key_id.is_some() {
        info!("  S3 credentials: static access key");
    } else {
        info!("  S3 credentials: default AWS provider chain");
    }
    info!("  Presign expiry: {}s", config.expiry_seconds);
    info!("  Backend timeout: {}s", config.backend_timeout_seconds);
    if config.public_health {
        info!("  Health check: public");
    } else {
        info!("  Health check: requires Authorization");
    }

    let s3_client = create_s3_client(&s3_settings).await;
    let store = S3ObjectStore::new(s3_client, bucket);
    let object_service =
        ObjectService::with_settings(store, config.presign_expiry(), config.backend_timeout());

    let router = create_router(object_service, config.router_config());

    let addr = config.bind_address();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    info!("Presign API listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "presign_gateway=debug,tower_http=debug"
    } else {
        "presign_gateway=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
