use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;

use super::ObjectStore;
use crate::error::StorageError;

/// Provider name attached to statically configured credentials.
const STATIC_CREDENTIALS_PROVIDER: &str = "presign-gateway";

/// Connection settings for the S3 client.
#[derive(Debug, Clone, Default)]
pub struct S3Settings {
    /// AWS region (also used when signing for S3-compatible services)
    pub region: String,

    /// Custom endpoint for S3-compatible services (MinIO, R2, etc.)
    pub endpoint: Option<String>,

    /// Address buckets as `endpoint/bucket/key` instead of `bucket.endpoint/key`
    pub force_path_style: bool,

    /// Static access key ID. Falls back to the default AWS credential chain
    /// when either key is missing.
    pub access_key_id: Option<String>,

    /// Static secret access key
    pub secret_access_key: Option<String>,
}

impl S3Settings {
    fn static_credentials(&self) -> Option<Credentials> {
        match (&self.access_key_id, &self.secret_access_key) {
            (Some(id), Some(secret)) => Some(Credentials::new(
                id,
                secret,
                None,
                None,
                STATIC_CREDENTIALS_PROVIDER,
            )),
            _ => None,
        }
    }
}

/// S3-backed implementation of [`ObjectStore`].
///
/// The client is cheap to clone and is shared read-only across requests.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Create a store for `bucket` using an already configured client.
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, StorageError> {
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| StorageError::Presigning(e.to_string()))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(map_sdk_error)?;

        Ok(request.uri().to_string())
    }

    async fn delete_object(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(map_sdk_error)?;

        Ok(())
    }
}

/// Convert an SDK error into a [`StorageError`].
///
/// Service errors keep the S3 error code and message; everything else
/// (dispatch failures, timeouts inside the SDK, malformed responses) is
/// reported as a connection error with the full error chain.
fn map_sdk_error<E, R>(err: SdkError<E, R>) -> StorageError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: Debug,
{
    match &err {
        SdkError::ServiceError(context) => {
            let service_err = context.err();
            let code = service_err.code().map(str::to_string);
            let message = service_err
                .message()
                .map(str::to_string)
                .or_else(|| code.clone())
                .unwrap_or_else(|| DisplayErrorContext(&err).to_string());
            StorageError::Backend { code, message }
        }
        _ => StorageError::Connection(DisplayErrorContext(&err).to_string()),
    }
}

/// Create an S3 client from connection settings.
///
/// Use a custom endpoint with path-style addressing for S3-compatible
/// services like MinIO:
/// ```ignore
/// let settings = S3Settings {
///     region: "us-east-1".to_string(),
///     endpoint: Some("http://localhost:9000".to_string()),
///     force_path_style: true,
///     ..Default::default()
/// };
/// let client = create_s3_client(&settings).await;
/// ```
pub async fn create_s3_client(settings: &S3Settings) -> Client {
    let region = aws_config::Region::new(settings.region.clone());
    let mut config_loader =
        aws_config::defaults(aws_config::BehaviorVersion::latest()).region(region);

    if let Some(ref endpoint) = settings.endpoint {
        config_loader = config_loader.endpoint_url(endpoint);
    }

    if let Some(credentials) = settings.static_credentials() {
        config_loader = config_loader.credentials_provider(credentials);
    }

    let sdk_config = config_loader.load().await;

    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(settings.force_path_style)
        .build();

    Client::from_conf(s3_config)
}
