use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tabular_etl::{
    Column, DataType, EtlError, InputMode, OutputMode, Reader, SinkDescriptor, SourceDescriptor,
    Table, Value, Writer,
};
use tempfile::TempDir;

/// 收集 tracing 輸出以便斷言警告內容
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

fn sample_table() -> Table {
    Table::new(vec![
        Column::new(
            "tconst",
            vec![
                Value::Str("tt0000001".to_string()),
                Value::Str("tt0000002".to_string()),
                Value::Str("tt0000003".to_string()),
            ],
        ),
        Column::new(
            "primaryTitle",
            vec![
                Value::Str("Carmencita".to_string()),
                Value::Str("Le clown et ses chiens".to_string()),
                Value::Str("Pauvre Pierrot, \"le\" film".to_string()),
            ],
        ),
        Column::new(
            "startYear",
            vec![Value::Int(1894), Value::Int(1892), Value::Int(1892)],
        ),
        Column::new(
            "rating",
            vec![Value::Float(5.7), Value::Float(6.0), Value::Null],
        ),
        Column::new(
            "isAdult",
            vec![Value::Bool(false), Value::Bool(true), Value::Bool(false)],
        ),
    ])
    .unwrap()
}

async fn round_trip(format: &str, file_name: &str) -> Table {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join(file_name);
    let path = path.to_str().unwrap();

    Writer::new()
        .store(
            &SinkDescriptor::new(OutputMode::Local, path, format),
            &sample_table(),
        )
        .await
        .unwrap();

    Reader::new()
        .load(&SourceDescriptor::new(InputMode::Local, path, format))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_parquet_round_trip_is_lossless() {
    let table = round_trip("parquet", "titles.parquet").await;
    assert_eq!(table, sample_table());
}

#[tokio::test]
async fn test_delimited_round_trips_narrow_booleans() {
    for (format, file_name) in [("csv", "titles.csv"), ("tsv", "titles.tsv")] {
        let table = round_trip(format, file_name).await;
        let expected = sample_table();

        assert_eq!(table.column_names(), expected.column_names());
        assert_eq!(table.num_rows(), expected.num_rows());
        for name in ["tconst", "primaryTitle", "startYear", "rating"] {
            assert_eq!(table.column(name), expected.column(name), "{} / {}", format, name);
        }

        // CSV 沒有布林型別
        assert_eq!(table.column("isAdult").unwrap().data_type(), DataType::Utf8);
        assert_eq!(table.cell(1, "isAdult"), Some(&Value::Str("True".to_string())));
    }
}

#[tokio::test]
async fn test_unsupported_output_format_falls_back_to_csv() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("titles.xml");
    let path = path.to_str().unwrap();

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    // current-thread runtime，整個 store 都在同一執行緒
    let guard = tracing::subscriber::set_default(subscriber);

    Writer::new()
        .store(
            &SinkDescriptor::new(OutputMode::Local, path, "xml"),
            &sample_table(),
        )
        .await
        .unwrap();
    drop(guard);

    let output = logs.contents();
    assert!(output.contains("WARN"), "{}", output);
    assert!(
        output.contains("Unsupported output format was supplied: xml"),
        "{}",
        output
    );

    let written = std::fs::read_to_string(path).unwrap();
    assert!(written.starts_with("tconst,primaryTitle,startYear,rating,isAdult\n"));
    assert!(written.contains("tt0000001,Carmencita,1894,5.7,False"));
}

#[tokio::test]
async fn test_unsupported_input_format() {
    let err = Reader::new()
        .load(&SourceDescriptor::new(InputMode::Local, "titles.xml", "xml"))
        .await
        .unwrap_err();

    assert!(matches!(err, EtlError::UnsupportedFormatError { .. }));
}

#[tokio::test]
async fn test_gzipped_tsv_is_decompressed_by_extension() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("title.basics.tsv.gz");

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(b"tconst\ttitleType\tstartYear\ntt01\tshort\t1894\ntt02\tmovie\t\\N\n")
        .unwrap();
    std::fs::write(&path, encoder.finish().unwrap()).unwrap();

    let table = Reader::new()
        .load(&SourceDescriptor::new(
            InputMode::Local,
            path.to_str().unwrap(),
            "tsv",
        ))
        .await
        .unwrap();

    assert_eq!(table.column_names(), vec!["tconst", "titleType", "startYear"]);
    assert_eq!(table.num_rows(), 2);
    assert_eq!(table.cell(1, "startYear"), Some(&Value::Str("\\N".to_string())));
}
