use crate::domain::descriptor::RemoteResponse;
use crate::domain::model::Table;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::fmt;

#[async_trait]
pub trait HttpClient: Send + Sync {
    /// 發出單一 GET 請求，不重試
    async fn get(&self, url: &str) -> Result<RemoteResponse>;
}

pub trait ObjectStore: Send + Sync {
    fn put_object(
        &self,
        credentials: &StorageCredentials,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[derive(Clone, PartialEq, Eq)]
pub struct StorageCredentials {
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub region: String,
}

impl fmt::Debug for StorageCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageCredentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "***"))
            .field("region", &self.region)
            .finish()
    }
}

pub trait CredentialsProvider: Send + Sync {
    /// 每次呼叫時讀取，不做快取
    fn credentials(&self) -> StorageCredentials;
}

pub trait Transform: Send + Sync {
    fn apply(&self, table: Table) -> Result<Table>;
}
