use crate::codec::{archive, delimited, json};
use crate::domain::descriptor::RemoteResponse;
use crate::domain::model::Table;
use crate::domain::ports::HttpClient;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::io::Cursor;

#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<RemoteResponse> {
        let transport_error = |e: reqwest::Error| EtlError::TransportError {
            location: url.to_string(),
            status: e.status().map(|s| s.as_u16()),
            message: format!("Request failed: {}", e),
        };

        tracing::debug!("Making API request to: {}", url);
        let response = self
            .client
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(transport_error)?;

        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response.bytes().await.map_err(transport_error)?;

        tracing::debug!(
            "API response status: {}, content-type: {:?}, {} bytes",
            status_code,
            content_type,
            body.len()
        );

        Ok(RemoteResponse {
            status_code,
            content_type,
            body,
        })
    }
}

/// 遠端讀取依回應的 Content-Type 分派，而非使用者宣告的格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteContentTypeStrategy {
    Json,
    DelimitedText,
    Gzip,
    Zip,
}

impl RemoteContentTypeStrategy {
    pub fn sniff(content_type: &str) -> Result<Self> {
        let normalized = content_type.to_ascii_lowercase();
        if normalized.contains("application/json") {
            Ok(RemoteContentTypeStrategy::Json)
        } else if normalized.contains("text/csv") || normalized.contains("text/plain") {
            Ok(RemoteContentTypeStrategy::DelimitedText)
        } else if normalized.contains("application/gzip") {
            Ok(RemoteContentTypeStrategy::Gzip)
        } else if normalized.contains("application/zip") {
            Ok(RemoteContentTypeStrategy::Zip)
        } else {
            Err(EtlError::UnsupportedContentTypeError {
                content_type: content_type.to_string(),
            })
        }
    }

    pub fn decode(self, body: &[u8]) -> Result<Table> {
        match self {
            RemoteContentTypeStrategy::Json => json::decode(body),
            RemoteContentTypeStrategy::DelimitedText => delimited::decode(body, delimited::COMMA),
            RemoteContentTypeStrategy::Gzip => archive::decode_gzip(body, delimited::COMMA),
            RemoteContentTypeStrategy::Zip => archive::decode_zip(Cursor::new(body), delimited::COMMA),
        }
    }
}

pub struct RemoteReader<H: HttpClient> {
    client: H,
}

impl<H: HttpClient> RemoteReader<H> {
    pub fn new(client: H) -> Self {
        Self { client }
    }

    pub async fn read(&self, location: &str) -> Result<Table> {
        // 在任何網路呼叫之前驗證
        validate_url("input_file_path", location)?;

        let response = self.client.get(location).await?;
        if response.status_code != 200 {
            return Err(EtlError::TransportError {
                location: location.to_string(),
                status: Some(response.status_code),
                message: format!(
                    "Failed to fetch data from {}. Status code: {}",
                    location, response.status_code
                ),
            });
        }

        let strategy = RemoteContentTypeStrategy::sniff(&response.content_type)?;
        tracing::info!(
            "Decoding {} response as {:?}",
            response.content_type,
            strategy
        );
        strategy.decode(&response.body)
    }
}
