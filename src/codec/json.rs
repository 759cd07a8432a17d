use crate::domain::model::{Column, Table, Value};
use crate::utils::error::Result;
use serde_json::{Map, Value as JsonValue};
use std::collections::HashSet;

/// 回應內容不是表格化 JSON 時，原始文字放在這個欄位
pub const RAW_TEXT_COLUMN: &str = "response_text";

pub fn decode(body: &[u8]) -> Result<Table> {
    let parsed = match serde_json::from_slice::<JsonValue>(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("⚠️ Response is not valid JSON ({}), keeping raw text", e);
            return raw_text_table(body);
        }
    };

    match table_from_json(parsed) {
        Some(table) => Ok(table),
        None => {
            tracing::warn!("⚠️ JSON response is not tabular, keeping raw text");
            raw_text_table(body)
        }
    }
}

pub fn raw_text_table(body: &[u8]) -> Result<Table> {
    let text = String::from_utf8_lossy(body).into_owned();
    Table::new(vec![Column::new(RAW_TEXT_COLUMN, vec![Value::Str(text)])])
}

fn table_from_json(parsed: JsonValue) -> Option<Table> {
    match parsed {
        JsonValue::Array(items) => from_records(items),
        JsonValue::Object(map) if !map.is_empty() && map.values().all(JsonValue::is_array) => {
            from_columns(map)
        }
        JsonValue::Object(map) if map.values().all(|v| !v.is_array()) => {
            from_records(vec![JsonValue::Object(map)])
        }
        _ => None,
    }
}

/// 物件陣列：每個物件為一列，欄位為所有 key 的聯集（依首次出現順序）
fn from_records(items: Vec<JsonValue>) -> Option<Table> {
    let mut names: Vec<String> = Vec::new();
    let mut seen = HashSet::new();
    let mut objects = Vec::with_capacity(items.len());

    for item in items {
        let JsonValue::Object(object) = item else {
            return None;
        };
        for key in object.keys() {
            if seen.insert(key.clone()) {
                names.push(key.clone());
            }
        }
        objects.push(object);
    }

    let rows = objects
        .into_iter()
        .map(|mut object| {
            names
                .iter()
                .map(|name| object.remove(name).map_or(Value::Null, to_value))
                .collect()
        })
        .collect();

    Table::from_rows(names, rows).ok()
}

/// 欄位導向：{"col": [..], ...}，各陣列長度必須一致
fn from_columns(map: Map<String, JsonValue>) -> Option<Table> {
    let columns = map
        .into_iter()
        .map(|(name, values)| match values {
            JsonValue::Array(items) => Some(Column::new(
                name,
                items.into_iter().map(to_value).collect(),
            )),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;

    Table::new(columns).ok()
}

fn to_value(json: JsonValue) -> Value {
    match json {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => n.as_f64().map_or(Value::Null, Value::Float),
        },
        JsonValue::String(s) => Value::Str(s),
        nested @ (JsonValue::Array(_) | JsonValue::Object(_)) => Value::Str(nested.to_string()),
    }
}
