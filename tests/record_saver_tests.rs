//! CSV sink tests: header-once under concurrency, field quoting, CRLF.

use std::sync::Arc;
use tempfile::TempDir;

use barscrape::page_extractor::RosterRecord;
use barscrape::record_saver::{CSV_HEADER, CsvSink};

fn record(bar_number: u32) -> RosterRecord {
    RosterRecord {
        bar_number,
        status: "Active".to_string(),
        name: "Jane Doe".to_string(),
        county: "Travis".to_string(),
        phone_number: "555-1234".to_string(),
        fax_number: "555-5678".to_string(),
        email: "jane@example.com".to_string(),
        law_school: "Example School of Law".to_string(),
        status_history: "Active since 1999".to_string(),
    }
}

#[tokio::test]
async fn header_is_written_exactly_once_under_concurrent_first_writers() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("out.csv");
    let sink = Arc::new(CsvSink::new(path.clone()));

    let mut handles = Vec::new();
    for n in 1..=16 {
        let sink = Arc::clone(&sink);
        handles.push(tokio::spawn(async move { sink.append(&record(n)).await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.split("\r\n").filter(|l| !l.is_empty()).collect();
    assert_eq!(lines.len(), 17, "one header plus sixteen rows");

    let header_count = lines
        .iter()
        .filter(|l| l.contains("\"Bar Number\""))
        .count();
    assert_eq!(header_count, 1);
    assert!(lines[0].starts_with("\"Bar Number\",\"Status\""));
}

#[tokio::test]
async fn rows_are_quoted_crlf_terminated_and_nine_columns_wide() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("out.csv");
    let sink = CsvSink::new(path.clone());

    let mut one = record(42);
    one.status_history = "Suspended 2001, reinstated 2003".to_string();
    sink.append(&one).await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.ends_with("\r\n"));

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(&path)
        .unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.len(), 9);
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        CSV_HEADER.to_vec(),
        "header columns match the fixed layout, comma in the last name and all"
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].len(), 9);
    assert_eq!(&rows[0][0], "42");
    assert_eq!(&rows[0][8], "Suspended 2001, reinstated 2003");

    // Every field is wrapped in double quotes on disk.
    let data_line = content.split("\r\n").nth(1).unwrap();
    assert!(data_line.starts_with('"') && data_line.ends_with('"'));
}

#[tokio::test]
async fn existing_file_is_appended_to_without_a_second_header() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("out.csv");

    let first = CsvSink::new(path.clone());
    first.append(&record(1)).await.unwrap();
    drop(first);

    // A restarted batch landing on the same file must not duplicate the header.
    let second = CsvSink::new(path.clone());
    second.append(&record(2)).await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.split("\r\n").filter(|l| !l.is_empty()).collect();
    assert_eq!(lines.len(), 3);
    let header_count = lines
        .iter()
        .filter(|l| l.contains("\"Bar Number\""))
        .count();
    assert_eq!(header_count, 1);
}

#[tokio::test]
async fn missing_output_directory_is_created() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nested").join("dir").join("out.csv");
    let sink = CsvSink::new(path.clone());

    sink.append(&record(9)).await.unwrap();
    assert!(path.exists());
}
