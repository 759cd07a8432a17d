use crate::domain::model::{Column, Table, Value};
use crate::utils::error::{EtlError, Result};
use std::collections::HashSet;
use std::io::{Read, Write};

pub const COMMA: u8 = b',';
pub const TAB: u8 = b'\t';

/// 讀取含標題列的分隔文字。空欄位為 null；
/// 整欄皆可解析為整數/浮點數時才轉型，布林值一律保留為字串
pub fn decode<R: Read>(reader: R, delimiter: u8) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = dedupe_headers(rdr.headers()?.iter());
    let mut fields: Vec<Vec<String>> = vec![Vec::new(); headers.len()];

    // 欄位不足的列以 null 補齊，超出標題的列視為錯誤
    for (line, record) in rdr.records().enumerate() {
        let record = record?;
        if record.len() > headers.len() {
            return Err(EtlError::processing(format!(
                "Row {} has {} fields but the header has {}",
                line + 1,
                record.len(),
                headers.len()
            )));
        }
        for (index, bucket) in fields.iter_mut().enumerate() {
            bucket.push(record.get(index).unwrap_or_default().to_string());
        }
    }

    tracing::debug!(
        "Decoded {} columns x {} rows of delimited text",
        headers.len(),
        fields.first().map_or(0, Vec::len)
    );

    Table::new(
        headers
            .into_iter()
            .zip(fields)
            .map(|(name, raw)| infer_column(name, raw))
            .collect(),
    )
}

pub fn encode<W: Write>(table: &Table, writer: W, delimiter: u8) -> Result<W> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    if table.num_columns() > 0 {
        wtr.write_record(table.column_names())?;
    }

    for row in 0..table.num_rows() {
        wtr.write_record(
            table
                .columns()
                .iter()
                .map(|column| column.values()[row].to_string()),
        )?;
    }

    wtr.into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}

fn infer_column(name: String, raw: Vec<String>) -> Column {
    let present = || raw.iter().filter(|field| !field.is_empty());

    let values = if present().all(|f| f.parse::<i64>().is_ok()) {
        raw.iter()
            .map(|f| f.parse().map_or(Value::Null, Value::Int))
            .collect()
    } else if present().all(|f| is_decimal(f)) {
        raw.iter()
            .map(|f| f.parse().map_or(Value::Null, Value::Float))
            .collect()
    } else {
        raw.into_iter()
            .map(|f| if f.is_empty() { Value::Null } else { Value::Str(f) })
            .collect()
    };

    Column::new(name, values)
}

/// inf、NaN 等字樣不視為數字
fn is_decimal(field: &str) -> bool {
    field.bytes().any(|b| b.is_ascii_digit()) && field.parse::<f64>().is_ok()
}

/// 重複的標題改名為 name.1、name.2 ...
fn dedupe_headers<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for header in headers {
        let mut candidate = header.to_string();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", header, suffix);
            suffix += 1;
        }
        seen.insert(candidate.clone());
        names.push(candidate);
    }

    names
}
