use crate::domain::model::{Column, DataType, Table, Value};
use crate::domain::ports::Transform;
use crate::utils::error::{EtlError, Result};

/// IMDb 資料集以 `\N` 表示缺值
pub const NULL_MARKER: &str = "\\N";

/// https://datasets.imdbws.com/title.basics.tsv.gz
pub const TITLE_BASICS_SCHEMA: &[(&str, DataType)] = &[
    ("tconst", DataType::Utf8),
    ("titleType", DataType::Utf8),
    ("primaryTitle", DataType::Utf8),
    ("originalTitle", DataType::Utf8),
    ("isAdult", DataType::Boolean),
    ("startYear", DataType::Integer),
    ("endYear", DataType::Integer),
    ("runtimeMinutes", DataType::Integer),
    ("genres", DataType::Utf8),
];

impl<F> Transform for F
where
    F: Fn(Table) -> Result<Table> + Send + Sync,
{
    fn apply(&self, table: Table) -> Result<Table> {
        self(table)
    }
}

/// 清理流程：`\N` 轉為 null、刪除含 null 的列、依 schema 轉型。
/// 不在 schema 內的欄位原樣保留
#[derive(Debug, Clone)]
pub struct CleaningTransform {
    schema: Vec<(String, DataType)>,
}

impl CleaningTransform {
    pub fn new(schema: &[(&str, DataType)]) -> Self {
        Self {
            schema: schema
                .iter()
                .map(|(name, data_type)| (name.to_string(), *data_type))
                .collect(),
        }
    }

    pub fn title_basics() -> Self {
        Self::new(TITLE_BASICS_SCHEMA)
    }

    fn target_type(&self, column: &str) -> Option<DataType> {
        self.schema
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, data_type)| *data_type)
    }
}

impl Transform for CleaningTransform {
    fn apply(&self, table: Table) -> Result<Table> {
        if let Some((missing, _)) = self
            .schema
            .iter()
            .find(|(name, _)| table.column(name).is_none())
        {
            return Err(EtlError::processing(format!(
                "Column {} not found in input (available: {})",
                missing,
                table.column_names().join(", ")
            )));
        }

        let columns: Vec<(String, Vec<Value>)> = table
            .into_columns()
            .into_iter()
            .map(|column| {
                let name = column.name().to_string();
                let values = column
                    .into_values()
                    .into_iter()
                    .map(|value| match value {
                        Value::Str(s) if s == NULL_MARKER => Value::Null,
                        other => other,
                    })
                    .collect::<Vec<_>>();
                (name, values)
            })
            .collect();

        let num_rows = columns.first().map_or(0, |(_, values)| values.len());
        let keep: Vec<bool> = (0..num_rows)
            .map(|row| columns.iter().all(|(_, values)| !values[row].is_null()))
            .collect();
        let dropped = keep.iter().filter(|k| !**k).count();
        tracing::info!(
            "🧹 Dropped {} of {} rows containing nulls",
            dropped,
            num_rows
        );

        let cleaned = columns
            .into_iter()
            .map(|(name, values)| -> Result<Column> {
                let kept = values
                    .into_iter()
                    .zip(&keep)
                    .filter_map(|(value, keep)| keep.then_some(value));

                let values = match self.target_type(&name) {
                    Some(target) => kept
                        .map(|value| coerce(&name, value, target))
                        .collect::<Result<Vec<_>>>()?,
                    None => kept.collect(),
                };
                Ok(Column::new(name, values))
            })
            .collect::<Result<Vec<_>>>()?;

        Table::new(cleaned)
    }
}

fn coerce(column: &str, value: Value, target: DataType) -> Result<Value> {
    let fail = |value: &Value| {
        EtlError::processing(format!(
            "Cannot convert {:?} in column {} to {:?}",
            value, column, target
        ))
    };

    let coerced = match (target, value) {
        (_, Value::Null) => Value::Null,

        (DataType::Utf8, Value::Str(s)) => Value::Str(s),
        (DataType::Utf8, other) => Value::Str(other.to_string()),

        (DataType::Boolean, Value::Bool(b)) => Value::Bool(b),
        (DataType::Boolean, Value::Int(i)) => Value::Bool(i != 0),
        (DataType::Boolean, Value::Float(f)) => Value::Bool(f != 0.0),
        (DataType::Boolean, Value::Str(s)) => match s.trim() {
            "1" | "true" | "True" => Value::Bool(true),
            "0" | "false" | "False" => Value::Bool(false),
            _ => return Err(fail(&Value::Str(s.clone()))),
        },

        (DataType::Integer, Value::Int(i)) => Value::Int(i),
        (DataType::Integer, Value::Bool(b)) => Value::Int(i64::from(b)),
        (DataType::Integer, Value::Float(f)) => match integral(f) {
            Some(i) => Value::Int(i),
            None => return Err(fail(&Value::Float(f))),
        },
        (DataType::Integer, Value::Str(s)) => {
            let trimmed = s.trim();
            match trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(integral))
            {
                Some(i) => Value::Int(i),
                None => return Err(fail(&Value::Str(s.clone()))),
            }
        }

        (DataType::Float, Value::Float(f)) => Value::Float(f),
        (DataType::Float, Value::Int(i)) => Value::Float(i as f64),
        (DataType::Float, Value::Bool(b)) => Value::Float(if b { 1.0 } else { 0.0 }),
        (DataType::Float, Value::Str(s)) => match s.trim().parse::<f64>() {
            Ok(f) => Value::Float(f),
            Err(_) => return Err(fail(&Value::Str(s.clone()))),
        },
    };

    Ok(coerced)
}

/// 僅接受落在 i64 範圍內的整數值浮點數
fn integral(f: f64) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
    (f.is_finite() && f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f)).then_some(f as i64)
}
