use crate::adapters::local::LocalFileWriter;
use crate::adapters::object_store::{ObjectStoreWriter, S3ObjectStore};
use crate::config::credentials::EnvCredentials;
use crate::domain::descriptor::{OutputMode, SinkDescriptor};
use crate::domain::model::Table;
use crate::domain::ports::{CredentialsProvider, ObjectStore};
use crate::utils::error::Result;

pub struct Writer<S: ObjectStore = S3ObjectStore, C: CredentialsProvider = EnvCredentials> {
    local: LocalFileWriter,
    remote: ObjectStoreWriter<S, C>,
}

impl Writer<S3ObjectStore, EnvCredentials> {
    pub fn new() -> Self {
        Self::with_object_store(S3ObjectStore::new(), EnvCredentials)
    }
}

impl Default for Writer<S3ObjectStore, EnvCredentials> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ObjectStore, C: CredentialsProvider> Writer<S, C> {
    pub fn with_object_store(store: S, credentials: C) -> Self {
        Self {
            local: LocalFileWriter::new(),
            remote: ObjectStoreWriter::new(store, credentials),
        }
    }

    /// 表格只以參照傳入，寫入端不會修改它
    pub async fn store(&self, descriptor: &SinkDescriptor, table: &Table) -> Result<()> {
        tracing::info!(
            "💾 Storing {} rows to {:?} sink {} ({})",
            table.num_rows(),
            descriptor.mode(),
            descriptor.location(),
            descriptor.declared_format()
        );

        match descriptor.mode() {
            OutputMode::Local => {
                self.local
                    .write(descriptor.location(), descriptor.declared_format(), table)
            }
            OutputMode::S3 => {
                self.remote
                    .write(descriptor.location(), descriptor.declared_format(), table)
                    .await
            }
        }
    }
}
