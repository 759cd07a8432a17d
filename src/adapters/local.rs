use crate::codec::{archive, columnar, delimited, OutputFormat};
use crate::domain::descriptor::DeclaredFormat;
use crate::domain::model::Table;
use crate::utils::error::{EtlError, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// 本地讀取依宣告格式分派
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalFormatStrategy {
    Csv,
    Tsv,
    Parquet,
}

impl LocalFormatStrategy {
    pub fn for_format(format: &DeclaredFormat) -> Result<Self> {
        match format {
            DeclaredFormat::Csv => Ok(LocalFormatStrategy::Csv),
            DeclaredFormat::Tsv => Ok(LocalFormatStrategy::Tsv),
            DeclaredFormat::Parquet => Ok(LocalFormatStrategy::Parquet),
            DeclaredFormat::Other(name) => Err(EtlError::UnsupportedFormatError {
                format: name.clone(),
            }),
        }
    }

    pub fn decode_file(self, path: &Path) -> Result<Table> {
        let file = File::open(path)?;
        let delimiter = match self {
            LocalFormatStrategy::Csv => delimited::COMMA,
            LocalFormatStrategy::Tsv => delimited::TAB,
            LocalFormatStrategy::Parquet => return columnar::decode(file),
        };

        // 與 pandas 相同，依副檔名推斷壓縮方式
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("gz") => archive::decode_gzip(file, delimiter),
            Some("zip") => archive::decode_zip(file, delimiter),
            _ => delimited::decode(file, delimiter),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LocalFileReader;

impl LocalFileReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read(&self, path: &str, format: &DeclaredFormat) -> Result<Table> {
        let strategy = LocalFormatStrategy::for_format(format)?;
        tracing::debug!("Reading local file {} as {:?}", path, strategy);
        strategy.decode_file(Path::new(path))
    }
}

#[derive(Debug, Clone, Default)]
pub struct LocalFileWriter;

impl LocalFileWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write(&self, path: &str, format: &DeclaredFormat, table: &Table) -> Result<()> {
        let format = OutputFormat::resolve(format);
        let full_path = Path::new(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(full_path)?;
        let mut writer = format.encode(table, BufWriter::new(file))?;
        writer.flush()?;

        tracing::debug!(
            "Wrote {} rows to {} as {:?}",
            table.num_rows(),
            path,
            format
        );
        Ok(())
    }
}
