use crate::adapters::http::{RemoteReader, ReqwestClient};
use crate::adapters::local::LocalFileReader;
use crate::domain::descriptor::{InputMode, SourceDescriptor};
use crate::domain::model::Table;
use crate::domain::ports::HttpClient;
use crate::utils::error::Result;

/// 將來源描述解析為表格。本地模式依宣告格式解碼，
/// 遠端模式（http / api）依回應的 Content-Type 解碼
pub struct Reader<H: HttpClient = ReqwestClient> {
    local: LocalFileReader,
    remote: RemoteReader<H>,
}

impl Reader<ReqwestClient> {
    pub fn new() -> Self {
        Self::with_client(ReqwestClient::new())
    }
}

impl Default for Reader<ReqwestClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: HttpClient> Reader<H> {
    pub fn with_client(client: H) -> Self {
        Self {
            local: LocalFileReader::new(),
            remote: RemoteReader::new(client),
        }
    }

    pub async fn load(&self, descriptor: &SourceDescriptor) -> Result<Table> {
        tracing::info!(
            "📥 Loading {:?} source {}",
            descriptor.mode(),
            descriptor.location()
        );

        let table = match descriptor.mode() {
            InputMode::Local => self
                .local
                .read(descriptor.location(), descriptor.declared_format())?,
            InputMode::Http | InputMode::Api => self.remote.read(descriptor.location()).await?,
        };

        tracing::info!(
            "Loaded {} rows x {} columns",
            table.num_rows(),
            table.num_columns()
        );
        Ok(table)
    }
}
