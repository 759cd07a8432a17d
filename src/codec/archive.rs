use crate::codec::delimited;
use crate::domain::model::Table;
use crate::utils::error::{EtlError, Result};
use flate2::read::MultiGzDecoder;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// 解壓 gzip 串流後以分隔文字解析
pub fn decode_gzip<R: Read>(reader: R, delimiter: u8) -> Result<Table> {
    delimited::decode(MultiGzDecoder::new(reader), delimiter)
}

/// 只讀取壓縮檔目錄中的第一個項目，其餘項目被忽略
pub fn decode_zip<R: Read + Seek>(reader: R, delimiter: u8) -> Result<Table> {
    let mut archive = ZipArchive::new(reader)?;
    if archive.len() == 0 {
        return Err(EtlError::processing("Zip archive contains no entries"));
    }
    if archive.len() > 1 {
        tracing::debug!(
            "Zip archive has {} entries, only the first one is read",
            archive.len()
        );
    }

    let entry = archive.by_index(0)?;
    tracing::debug!("Reading zip entry {}", entry.name());
    delimited::decode(entry, delimiter)
}
