use crate::utils::error::{EtlError, Result};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Boolean,
    Integer,
    Float,
    Utf8,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(DataType::Boolean),
            Value::Int(_) => Some(DataType::Integer),
            Value::Float(_) => Some(DataType::Float),
            Value::Str(_) => Some(DataType::Utf8),
        }
    }
}

/// 文字化時採用與 pandas 相同的慣例：布林為 True/False，null 為空字串
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(i) => write!(f, "{}", i),
            // Debug 保留小數點 (1.0 而非 1)
            Value::Float(v) => write!(f, "{:?}", v),
            Value::Str(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<Value>,
}

impl Column {
    /// 混合型別的欄位會被統一：整數與浮點數合併為浮點數，其它組合轉為字串
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        let mut column = Self {
            name: name.into(),
            values,
        };
        column.unify();
        column
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 第一個非 null 值的型別；全為 null 時視為字串欄位
    pub fn data_type(&self) -> DataType {
        self.values
            .iter()
            .find_map(Value::data_type)
            .unwrap_or(DataType::Utf8)
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    fn unify(&mut self) {
        let types: HashSet<DataType> = self.values.iter().filter_map(Value::data_type).collect();
        if types.len() <= 1 {
            return;
        }

        let numeric_only = types
            .iter()
            .all(|t| matches!(t, DataType::Integer | DataType::Float));

        for value in &mut self.values {
            let replaced = match &*value {
                Value::Null => continue,
                Value::Int(i) if numeric_only => Value::Float(*i as f64),
                Value::Float(_) if numeric_only => continue,
                Value::Str(_) => continue,
                other => Value::Str(other.to_string()),
            };
            *value = replaced;
        }
    }
}

/// In-memory ordered collection of named, row-aligned columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(EtlError::processing(format!(
                    "Duplicate column name: {}",
                    column.name()
                )));
            }
        }

        if let Some(first) = columns.first() {
            let rows = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != rows) {
                return Err(EtlError::processing(format!(
                    "Column {} has {} rows, expected {}",
                    bad.name(),
                    bad.len(),
                    rows
                )));
            }
        }

        Ok(Self { columns })
    }

    /// 以列為單位建立表格，`names` 決定欄位順序
    pub fn from_rows(names: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        let mut buckets: Vec<Vec<Value>> = names
            .iter()
            .map(|_| Vec::with_capacity(rows.len()))
            .collect();

        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != names.len() {
                return Err(EtlError::processing(format!(
                    "Row {} has {} cells, expected {}",
                    index,
                    row.len(),
                    names.len()
                )));
            }
            for (bucket, value) in buckets.iter_mut().zip(row) {
                bucket.push(value);
            }
        }

        Self::new(
            names
                .into_iter()
                .zip(buckets)
                .map(|(name, values)| Column::new(name, values))
                .collect(),
        )
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        self.column(column).and_then(|c| c.values().get(row))
    }

    pub fn row(&self, index: usize) -> Option<Vec<&Value>> {
        if index >= self.num_rows() {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values()[index]).collect())
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }
}
