use crate::domain::model::{Column, DataType, Table, Value};
use crate::utils::error::Result;
use arrow::array::{Array, ArrayRef, AsArray, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType as ArrowType, Field, Float64Type, Int64Type, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::file::reader::ChunkReader;
use std::io::Write;
use std::sync::Arc;

/// 解碼 Parquet：整數型別統一為 i64，浮點數為 f64，其餘型別轉為字串
pub fn decode<R: ChunkReader + 'static>(reader: R) -> Result<Table> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(reader)?;
    let schema = builder.schema().clone();
    let batches = builder.build()?;

    let mut values: Vec<Vec<Value>> = vec![Vec::new(); schema.fields().len()];
    for batch in batches {
        let batch = batch?;
        for (bucket, array) in values.iter_mut().zip(batch.columns()) {
            append_values(array, bucket)?;
        }
    }

    Table::new(
        schema
            .fields()
            .iter()
            .zip(values)
            .map(|(field, values)| Column::new(field.name().clone(), values))
            .collect(),
    )
}

pub fn encode<W: Write + Send>(table: &Table, writer: W) -> Result<W> {
    let fields: Vec<Field> = table
        .columns()
        .iter()
        .map(|column| Field::new(column.name(), arrow_type(column.data_type()), true))
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let mut writer = ArrowWriter::try_new(writer, schema.clone(), None)?;
    if table.num_columns() > 0 {
        let arrays = table.columns().iter().map(to_array).collect();
        let batch = RecordBatch::try_new(schema, arrays)?;
        writer.write(&batch)?;
    }

    Ok(writer.into_inner()?)
}

fn arrow_type(data_type: DataType) -> ArrowType {
    match data_type {
        DataType::Boolean => ArrowType::Boolean,
        DataType::Integer => ArrowType::Int64,
        DataType::Float => ArrowType::Float64,
        DataType::Utf8 => ArrowType::Utf8,
    }
}

fn to_array(column: &Column) -> ArrayRef {
    let values = column.values();
    match column.data_type() {
        DataType::Boolean => Arc::new(BooleanArray::from(
            values
                .iter()
                .map(|v| match v {
                    Value::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect::<Vec<_>>(),
        )),
        DataType::Integer => Arc::new(Int64Array::from(
            values
                .iter()
                .map(|v| match v {
                    Value::Int(i) => Some(*i),
                    _ => None,
                })
                .collect::<Vec<_>>(),
        )),
        DataType::Float => Arc::new(Float64Array::from(
            values
                .iter()
                .map(|v| match v {
                    Value::Float(f) => Some(*f),
                    _ => None,
                })
                .collect::<Vec<_>>(),
        )),
        DataType::Utf8 => Arc::new(StringArray::from(
            values
                .iter()
                .map(|v| match v {
                    Value::Null => None,
                    other => Some(other.to_string()),
                })
                .collect::<Vec<_>>(),
        )),
    }
}

fn append_values(array: &ArrayRef, out: &mut Vec<Value>) -> Result<()> {
    match array.data_type() {
        ArrowType::Null => out.extend(std::iter::repeat(Value::Null).take(array.len())),
        ArrowType::Boolean => out.extend(
            array
                .as_boolean()
                .iter()
                .map(|v| v.map_or(Value::Null, Value::Bool)),
        ),
        t if t.is_integer() => {
            let ints = cast(array, &ArrowType::Int64)?;
            out.extend(
                ints.as_primitive::<Int64Type>()
                    .iter()
                    .map(|v| v.map_or(Value::Null, Value::Int)),
            );
        }
        t if t.is_floating() => {
            let floats = cast(array, &ArrowType::Float64)?;
            out.extend(
                floats
                    .as_primitive::<Float64Type>()
                    .iter()
                    .map(|v| v.map_or(Value::Null, Value::Float)),
            );
        }
        _ => {
            let text = cast(array, &ArrowType::Utf8)?;
            out.extend(
                text.as_string::<i32>()
                    .iter()
                    .map(|v| v.map_or(Value::Null, |s| Value::Str(s.to_string()))),
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_parquet_preserves_native_types() {
        let table = Table::new(vec![
            Column::new("tconst", vec![Value::Str("tt01".to_string()), Value::Null]),
            Column::new("isAdult", vec![Value::Bool(false), Value::Bool(true)]),
            Column::new("startYear", vec![Value::Int(1894), Value::Int(2001)]),
            Column::new("rating", vec![Value::Float(7.5), Value::Null]),
        ])
        .unwrap();

        let bytes = encode(&table, Vec::new()).unwrap();
        let decoded = decode(Bytes::from(bytes)).unwrap();

        assert_eq!(decoded, table);
        assert_eq!(decoded.column("isAdult").unwrap().data_type(), DataType::Boolean);
    }

    #[test]
    fn test_garbage_is_rejected() {
        let result = decode(Bytes::from_static(b"definitely not parquet"));
        assert!(matches!(
            result,
            Err(crate::utils::error::EtlError::ParquetError(_))
        ));
    }
}
