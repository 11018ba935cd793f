//! Tests for JSON and CSV export.

mod support;

use asd_rust::services::export::{default_filename, to_csv, to_pretty_json};
use asd_rust::services::flatten::{flatten, FlatRow};
use chrono::NaiveDate;
use support::sample_statement;

#[test]
fn pretty_json_round_trips_the_document() {
    let statement = sample_statement();
    let json = to_pretty_json(&statement);
    // Pretty-printed output stays parseable and lossless.
    let reparsed = asd_rust::models::parse_statement_json_str(&json).unwrap();
    assert_eq!(reparsed.fields(), statement.fields());
    assert!(json.contains("\n  \"site_details\""));
}

#[test]
fn csv_uses_the_review_table_path_convention() {
    let statement = sample_statement();
    let csv = to_csv(&statement);
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines[0], "field,value");
    assert!(lines.contains(&"site_details > actual_site_area > sqm,1000"));
    assert!(lines.contains(&"building_floors > residential,B2 + Stilt + 12"));

    // One record per leaf row, sections omitted.
    let leaves = flatten(statement.fields())
        .into_iter()
        .filter(FlatRow::is_leaf)
        .count();
    assert_eq!(lines.len(), leaves + 1);
}

#[test]
fn csv_quotes_fields_containing_commas() {
    let statement = asd_rust::models::parse_statement_json_str(
        r#"{"notes": {"remark": "phase 1, block A"}}"#,
    )
    .unwrap();
    let csv = to_csv(&statement);
    assert!(csv.contains("notes > remark,\"phase 1, block A\""));
}

#[test]
fn default_filename_is_dated() {
    let date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
    assert_eq!(default_filename(date), "area-statement-2025-07-01");
}
