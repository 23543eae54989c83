mod common;

use chrono::NaiveDate;
use common::init_logging;
use edgar_xbrl::edgar::report::form_with_amendments;
use edgar_xbrl::{EdgarConfig, Filing, ReportType};
use std::fs;
use tempfile::tempdir;

fn apple_10k() -> Filing {
    Filing::new(
        320193,
        "Apple Inc.",
        ReportType::Form10K,
        NaiveDate::from_ymd_opt(2023, 11, 3).unwrap(),
        "0000320193-23-000106",
    )
    .unwrap()
}

#[test]
fn test_filing_json_file_round_trip() {
    init_logging();
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("filing.json");
    fs::write(&path, apple_10k().to_json().unwrap()).unwrap();

    let loaded = Filing::from_json_file(&path).unwrap();
    assert_eq!(loaded, apple_10k());
    assert_eq!(loaded.company, "Apple Inc.");
    assert_eq!(loaded.form, ReportType::Form10K);
}

#[test]
fn test_from_json_file_reports_missing_file() {
    init_logging();
    let temp_dir = tempdir().unwrap();
    let err = Filing::from_json_file(&temp_dir.path().join("missing.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to read filing"));
}

#[test]
fn test_amended_form_from_json() {
    let json = r#"{"accession_number":"0000320193-24-000010","cik":320193,"company":"Apple Inc.","form":"10-K/A","filing_date":"2024-02-01"}"#;
    let filing = Filing::from_json(json).unwrap();
    assert!(filing.form.is_amendment());
    assert!(form_with_amendments(&["10-K"]).contains(&filing.form.to_string()));
}

#[test]
fn test_urls_follow_configured_archive() {
    init_logging();
    let config = EdgarConfig::with_archives_url("http://mirror.local/edgar/").unwrap();
    assert_eq!(
        apple_10k().homepage_url(&config),
        "http://mirror.local/edgar/data/320193/0000320193-23-000106-index.html"
    );
}
