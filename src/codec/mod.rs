// Format codecs: delimited text, parquet, JSON and compressed archives.

pub mod archive;
pub mod columnar;
pub mod delimited;
pub mod json;

use crate::domain::descriptor::DeclaredFormat;
use crate::domain::model::Table;
use crate::utils::error::Result;
use std::io::Write;

/// 寫入端可用的格式，`resolve` 將宣告格式對應到其中之一
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Tsv,
    Parquet,
}

impl OutputFormat {
    /// 無法辨識的格式記錄警告並退回 CSV
    pub fn resolve(declared: &DeclaredFormat) -> Self {
        match declared {
            DeclaredFormat::Csv => OutputFormat::Csv,
            DeclaredFormat::Tsv => OutputFormat::Tsv,
            DeclaredFormat::Parquet => OutputFormat::Parquet,
            DeclaredFormat::Other(name) => {
                tracing::warn!(
                    "⚠️ Unsupported output format was supplied: {}. Proceeding to use default csv.",
                    name
                );
                OutputFormat::Csv
            }
        }
    }

    pub fn encode<W: Write + Send>(self, table: &Table, writer: W) -> Result<W> {
        match self {
            OutputFormat::Csv => delimited::encode(table, writer, delimited::COMMA),
            OutputFormat::Tsv => delimited::encode(table, writer, delimited::TAB),
            OutputFormat::Parquet => columnar::encode(table, writer),
        }
    }

    pub fn encode_to_vec(self, table: &Table) -> Result<Vec<u8>> {
        self.encode(table, Vec::new())
    }
}
