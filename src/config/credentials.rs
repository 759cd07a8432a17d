use crate::domain::ports::{CredentialsProvider, StorageCredentials};
use std::env;

pub const ACCESS_KEY_VAR: &str = "AWS_ACCESS_KEY";
pub const SECRET_KEY_VAR: &str = "AWS_SECRET_KEY";
pub const REGION_VAR: &str = "AWS_REGION_NAME";
pub const DEFAULT_REGION: &str = "ap-southeast-1";

/// 從環境變數讀取物件儲存憑證
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialsProvider for EnvCredentials {
    fn credentials(&self) -> StorageCredentials {
        StorageCredentials {
            access_key: env::var(ACCESS_KEY_VAR).ok(),
            secret_key: env::var(SECRET_KEY_VAR).ok(),
            region: env::var(REGION_VAR).unwrap_or_else(|_| DEFAULT_REGION.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StaticCredentials {
    credentials: StorageCredentials,
}

impl StaticCredentials {
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            credentials: StorageCredentials {
                access_key: Some(access_key.into()),
                secret_key: Some(secret_key.into()),
                region: region.into(),
            },
        }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn credentials(&self) -> StorageCredentials {
        self.credentials.clone()
    }
}
