use crate::utils::error::{EtlError, Result};
use bytes::Bytes;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Local,
    Http,
    Api,
}

impl InputMode {
    pub fn is_remote(self) -> bool {
        matches!(self, InputMode::Http | InputMode::Api)
    }
}

impl FromStr for InputMode {
    type Err = EtlError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "local" => Ok(InputMode::Local),
            "http" => Ok(InputMode::Http),
            "api" => Ok(InputMode::Api),
            other => Err(EtlError::configuration(format!(
                "Invalid input mode was supplied {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Local,
    S3,
}

impl FromStr for OutputMode {
    type Err = EtlError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "local" => Ok(OutputMode::Local),
            "s3" => Ok(OutputMode::S3),
            other => Err(EtlError::configuration(format!(
                "Invalid output mode was supplied {}",
                other
            ))),
        }
    }
}

/// 使用者宣告的檔案格式。無法辨識的值保留在 `Other`，
/// 由讀取端（回報錯誤）與寫入端（退回 CSV）各自決定處理方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredFormat {
    Csv,
    Tsv,
    Parquet,
    Other(String),
}

impl From<&str> for DeclaredFormat {
    fn from(s: &str) -> Self {
        match s {
            "csv" => DeclaredFormat::Csv,
            "tsv" => DeclaredFormat::Tsv,
            "parquet" => DeclaredFormat::Parquet,
            other => DeclaredFormat::Other(other.to_string()),
        }
    }
}

impl fmt::Display for DeclaredFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclaredFormat::Csv => f.write_str("csv"),
            DeclaredFormat::Tsv => f.write_str("tsv"),
            DeclaredFormat::Parquet => f.write_str("parquet"),
            DeclaredFormat::Other(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    mode: InputMode,
    location: String,
    declared_format: DeclaredFormat,
}

impl SourceDescriptor {
    pub fn new(
        mode: InputMode,
        location: impl Into<String>,
        declared_format: impl Into<DeclaredFormat>,
    ) -> Self {
        Self {
            mode,
            location: location.into(),
            declared_format: declared_format.into(),
        }
    }

    /// 從 CLI 字串建立，模式無法辨識時回傳 ConfigurationError
    pub fn parse(mode: &str, location: &str, declared_format: &str) -> Result<Self> {
        Ok(Self::new(mode.parse()?, location, declared_format))
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn declared_format(&self) -> &DeclaredFormat {
        &self.declared_format
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkDescriptor {
    mode: OutputMode,
    location: String,
    declared_format: DeclaredFormat,
}

impl SinkDescriptor {
    pub fn new(
        mode: OutputMode,
        location: impl Into<String>,
        declared_format: impl Into<DeclaredFormat>,
    ) -> Self {
        Self {
            mode,
            location: location.into(),
            declared_format: declared_format.into(),
        }
    }

    pub fn parse(mode: &str, location: &str, declared_format: &str) -> Result<Self> {
        Ok(Self::new(mode.parse()?, location, declared_format))
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn declared_format(&self) -> &DeclaredFormat {
        &self.declared_format
    }
}

/// 單次 GET 的結果，只會被消費一次
#[derive(Debug, Clone)]
pub struct RemoteResponse {
    pub status_code: u16,
    pub content_type: String,
    pub body: Bytes,
}
