use flate2::write::GzEncoder;
use flate2::Compression;
use httpmock::prelude::*;
use std::io::{Cursor, Write};
use tabular_etl::codec::json::RAW_TEXT_COLUMN;
use tabular_etl::{EtlError, InputMode, Reader, SourceDescriptor, Value};
use zip::write::{FileOptions, ZipWriter};

fn http_source(url: String) -> SourceDescriptor {
    // 遠端模式忽略宣告格式
    SourceDescriptor::new(InputMode::Http, url, "parquet")
}

#[tokio::test]
async fn test_json_array_of_objects() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/titles")
                .header("content-type", "application/json");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(serde_json::json!([
                    {"tconst": "tt01", "startYear": 1894},
                    {"tconst": "tt02", "genres": "Short"},
                    {"tconst": "tt03", "startYear": 1900, "genres": "Comedy"}
                ]));
        })
        .await;

    let table = Reader::new()
        .load(&http_source(server.url("/titles")))
        .await
        .unwrap();

    api_mock.assert_async().await;
    assert_eq!(table.column_names(), vec!["tconst", "startYear", "genres"]);
    assert_eq!(table.num_rows(), 3);
    assert_eq!(table.cell(1, "startYear"), Some(&Value::Null));
    assert_eq!(table.cell(2, "startYear"), Some(&Value::Int(1900)));
}

#[tokio::test]
async fn test_invalid_json_falls_back_to_raw_text() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/broken");
            then.status(200)
                .header("content-type", "application/json; charset=utf-8")
                .body("{not json");
        })
        .await;

    let table = Reader::new()
        .load(&http_source(server.url("/broken")))
        .await
        .unwrap();

    assert_eq!(table.column_names(), vec![RAW_TEXT_COLUMN]);
    assert_eq!(table.num_rows(), 1);
    assert_eq!(
        table.cell(0, RAW_TEXT_COLUMN),
        Some(&Value::Str("{not json".to_string()))
    );
}

#[tokio::test]
async fn test_not_found_is_transport_error() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/missing");
            then.status(404);
        })
        .await;

    let err = Reader::new()
        .load(&http_source(server.url("/missing")))
        .await
        .unwrap_err();

    api_mock.assert_async().await;
    match err {
        EtlError::TransportError {
            status, location, ..
        } => {
            assert_eq!(status, Some(404));
            assert!(location.ends_with("/missing"));
        }
        other => panic!("expected TransportError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_zip_reads_only_first_entry() {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file::<_, ()>("first.csv", FileOptions::default())
        .unwrap();
    zip.write_all(b"id,name\n1,alpha\n2,beta\n").unwrap();
    zip.start_file::<_, ()>("second.csv", FileOptions::default())
        .unwrap();
    zip.write_all(b"other\nx\ny\nz\n").unwrap();
    let archive = zip.finish().unwrap().into_inner();

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/bundle");
            then.status(200)
                .header("content-type", "application/zip")
                .body(archive);
        })
        .await;

    let table = Reader::new()
        .load(&http_source(server.url("/bundle")))
        .await
        .unwrap();

    assert_eq!(table.column_names(), vec!["id", "name"]);
    assert_eq!(table.num_rows(), 2);
}

#[tokio::test]
async fn test_gzip_csv_response() {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(b"tconst,isAdult\ntt01,0\ntt02,1\n")
        .unwrap();
    let body = encoder.finish().unwrap();

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/title.basics.csv.gz");
            then.status(200)
                .header("content-type", "application/gzip")
                .body(body);
        })
        .await;

    let source = SourceDescriptor::new(InputMode::Api, server.url("/title.basics.csv.gz"), "tsv");
    let table = Reader::new().load(&source).await.unwrap();

    assert_eq!(table.num_rows(), 2);
    assert_eq!(table.cell(1, "isAdult"), Some(&Value::Int(1)));
}

#[tokio::test]
async fn test_plain_text_is_parsed_as_csv() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/export");
            then.status(200)
                .header("content-type", "text/plain")
                .body("a,b\n1,x\n");
        })
        .await;

    let table = Reader::new()
        .load(&http_source(server.url("/export")))
        .await
        .unwrap();

    assert_eq!(table.column_names(), vec!["a", "b"]);
    assert_eq!(table.cell(0, "b"), Some(&Value::Str("x".to_string())));
}

#[tokio::test]
async fn test_unsupported_content_type() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/logo");
            then.status(200)
                .header("content-type", "image/png")
                .body([0x89u8, 0x50, 0x4e, 0x47]);
        })
        .await;

    let err = Reader::new()
        .load(&http_source(server.url("/logo")))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        EtlError::UnsupportedContentTypeError { content_type } if content_type == "image/png"
    ));
}

#[tokio::test]
async fn test_malformed_url_is_validation_error() {
    let err = Reader::new()
        .load(&SourceDescriptor::new(InputMode::Http, "not-a-url", "csv"))
        .await
        .unwrap_err();

    assert!(matches!(err, EtlError::ValidationError { .. }));
}
