//! Tests for upload and structural validation.

mod support;

use asd_rust::services::validation::{
    parse_upload, validate_statement, MAX_UPLOAD_BYTES,
};
use support::{sample_statement, statement_json_without, SAMPLE_STATEMENT};

const JSON: Option<&str> = Some("application/json");

#[test]
fn valid_upload_parses() {
    let statement = parse_upload(JSON, SAMPLE_STATEMENT.as_bytes()).unwrap();
    assert!(validate_statement(&statement).is_ok());
}

#[test]
fn empty_file_is_rejected() {
    let err = parse_upload(JSON, b"").unwrap_err();
    assert!(err.to_string().contains("empty"), "got: {}", err);
}

#[test]
fn oversized_file_is_rejected() {
    // 11 MB of a syntactically irrelevant payload; size is checked first.
    let body = vec![b'x'; 11 * 1024 * 1024];
    assert!(body.len() > MAX_UPLOAD_BYTES);

    let err = parse_upload(JSON, &body).unwrap_err();
    assert!(err.to_string().contains("10MB"), "got: {}", err);
}

#[test]
fn wrong_content_type_is_rejected() {
    let err = parse_upload(Some("text/csv"), SAMPLE_STATEMENT.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("JSON file"), "got: {}", err);
}

#[test]
fn unparseable_json_is_rejected() {
    let err = parse_upload(JSON, b"{not valid json").unwrap_err();
    assert!(err.to_string().contains("Invalid area statement JSON"));
}

#[test]
fn missing_amenities_area_is_listed_exactly() {
    let body = statement_json_without("amenities_area");
    let statement = parse_upload(JSON, body.as_bytes()).unwrap();

    let err = validate_statement(&statement).unwrap_err();
    assert_eq!(err.missing, vec!["amenities_area".to_string()]);
    assert_eq!(
        err.to_string(),
        "Missing required property: amenities_area"
    );
}

#[test]
fn every_missing_key_is_listed() {
    let statement = parse_upload(JSON, b"{}").unwrap();
    let err = validate_statement(&statement).unwrap_err();
    assert_eq!(err.missing.len(), 6);
    assert!(err.to_string().contains("site_details"));
    assert!(err.to_string().contains("amenities_area"));
}

#[test]
fn complete_statement_passes_structural_checks() {
    assert!(validate_statement(&sample_statement()).is_ok());
}
