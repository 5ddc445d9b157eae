//! Tests for loading report, reference, escalation and configuration files.

use std::io::Write;
use std::path::Path;

use hx_ingest::{IngestError, load_config, read_escalations, read_report, read_table};
use hx_model::WorkerRoster;
use polars::prelude::DataType;
use tempfile::{NamedTempFile, TempDir};

fn create_temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file
}

#[test]
fn reads_every_column_as_text() {
    let file = create_temp_file(
        "Appointment State,Patient Acct No,Appointment Date\nTX,00123,03/14/2024\nCA,456,\n",
    );
    let df = read_report(file.path()).unwrap();

    assert_eq!(df.height(), 2);
    for column in df.get_columns() {
        assert_eq!(column.dtype(), &DataType::String);
    }
    let accounts = df.column("Patient Acct No").unwrap();
    assert_eq!(accounts.str().unwrap().get(0), Some("00123"));
}

#[test]
fn normalizes_headers() {
    let file = create_temp_file("\u{feff} Visit   Type ,Appointment State \nNew Patient,TX\n");
    let df = read_table(file.path()).unwrap();
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(names, vec!["Visit Type", "Appointment State"]);
}

#[test]
fn header_only_file_is_an_empty_table() {
    let file = create_temp_file("Appointment State,Visit Type\n");
    let df = read_table(file.path()).unwrap();
    assert_eq!(df.height(), 0);
    assert_eq!(df.width(), 2);
}

#[test]
fn empty_file_is_rejected() {
    let file = create_temp_file("");
    assert!(matches!(
        read_table(file.path()),
        Err(IngestError::EmptyCsv { .. })
    ));
}

#[test]
fn escalations_skip_blanks_and_sentinels() {
    let file = create_temp_file("Name,Acc#,Notes\nA, 1001 ,x\nB,nan,y\nC,,z\nD,1002,w\nE,1001,v\n");
    let accounts = read_escalations(file.path()).unwrap();
    let accounts: Vec<&str> = accounts.iter().map(String::as_str).collect();
    assert_eq!(accounts, vec!["1001", "1002"]);
}

#[test]
fn escalations_require_an_account_column() {
    let file = create_temp_file("Name,Notes\nA,x\n");
    let err = read_escalations(file.path()).unwrap_err();
    assert!(matches!(err, IngestError::MissingAccountColumn { .. }));
    assert!(err.to_string().contains("acc#"));
}

#[test]
fn partial_config_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("allocation.toml");
    std::fs::write(
        &path,
        "workers = [\"Alice\", \" Bob \"]\nvisit_status_filter = true\n\n[columns]\nprovider = \"Rendering Provider\"\n",
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.roster, WorkerRoster::new(["Alice", "Bob"]));
    assert!(config.visit_status_filter);
    assert_eq!(config.columns.provider, "Rendering Provider");
    assert_eq!(config.columns.visit_type, "Visit Type");
    assert_eq!(config.new_patient_marker, "new");
}

#[test]
fn invalid_config_names_the_file() {
    let file = create_temp_file("workers = \"not a list\"\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, IngestError::InvalidConfig { .. }));
}

#[test]
fn missing_config_file() {
    let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}
