use crate::codec::OutputFormat;
use crate::domain::descriptor::DeclaredFormat;
use crate::domain::model::Table;
use crate::domain::ports::{CredentialsProvider, ObjectStore, StorageCredentials};
use crate::utils::error::{EtlError, Result};
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

impl ObjectLocation {
    /// `s3://bucket/path/to/key` -> bucket + key
    pub fn parse(location: &str) -> Result<Self> {
        let invalid = |reason: &str| EtlError::ValidationError {
            field: "output_file_path".to_string(),
            value: location.to_string(),
            reason: reason.to_string(),
        };

        let (_, remainder) = location
            .split_once("//")
            .ok_or_else(|| invalid("Object store path must look like s3://bucket/key"))?;
        let (bucket, key) = remainder
            .split_once('/')
            .ok_or_else(|| invalid("Object store path is missing an object key"))?;

        if bucket.is_empty() {
            return Err(invalid("Bucket name cannot be empty"));
        }
        if key.is_empty() {
            return Err(invalid("Object key cannot be empty"));
        }

        Ok(Self {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }
}

/// 每次上傳都以當下的憑證建立新的 S3 client
#[derive(Debug, Clone, Default)]
pub struct S3ObjectStore;

impl S3ObjectStore {
    pub fn new() -> Self {
        Self
    }

    async fn client_for(&self, credentials: &StorageCredentials) -> S3Client {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(credentials.region.clone()));

        // 未提供金鑰時交由 SDK 的預設憑證鏈處理
        if let (Some(access_key), Some(secret_key)) =
            (&credentials.access_key, &credentials.secret_key)
        {
            loader = loader.credentials_provider(Credentials::new(
                access_key.clone(),
                secret_key.clone(),
                None,
                None,
                "tabular-etl-environment",
            ));
        }

        S3Client::new(&loader.load().await)
    }
}

impl ObjectStore for S3ObjectStore {
    async fn put_object(
        &self,
        credentials: &StorageCredentials,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
    ) -> Result<()> {
        let client = self.client_for(credentials).await;

        client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|err| EtlError::TransportError {
                location: format!("s3://{}/{}", bucket, key),
                status: err.raw_response().map(|r| r.status().as_u16()),
                message: format!("Upload failed: {}", DisplayErrorContext(&err)),
            })?;

        Ok(())
    }
}

pub struct ObjectStoreWriter<S: ObjectStore, C: CredentialsProvider> {
    store: S,
    credentials: C,
}

impl<S: ObjectStore, C: CredentialsProvider> ObjectStoreWriter<S, C> {
    pub fn new(store: S, credentials: C) -> Self {
        Self { store, credentials }
    }

    pub async fn write(&self, location: &str, format: &DeclaredFormat, table: &Table) -> Result<()> {
        let target = ObjectLocation::parse(location)?;
        let credentials = self.credentials.credentials();
        let format = OutputFormat::resolve(format);

        let buffer = format.encode_to_vec(table)?;
        tracing::info!(
            "📤 Uploading {} bytes ({:?}) to s3://{}/{} in {}",
            buffer.len(),
            format,
            target.bucket,
            target.key,
            credentials.region
        );

        self.store
            .put_object(&credentials, &target.bucket, &target.key, buffer)
            .await
    }
}
