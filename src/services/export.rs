//! Export of an area statement to JSON and CSV.
//!
//! The CSV projection reuses the flattened review-table rows: one record per
//! leaf field, labels joined with the same " > " convention the table shows.
//! Section rows carry no value and are omitted.

use chrono::NaiveDate;
use serde_json::Value;

use crate::models::AreaStatement;
use crate::services::flatten::{flatten, FlatRow};

/// Pretty-printed JSON of the full document.
pub fn to_pretty_json(statement: &AreaStatement) -> String {
    serde_json::to_string_pretty(statement.fields()).unwrap_or_default()
}

/// Flattened-row CSV of the document, `field,value` header included.
pub fn to_csv(statement: &AreaStatement) -> String {
    let mut out = String::from("field,value\n");
    for row in flatten(statement.fields()) {
        if let FlatRow::Leaf { path, value } = row {
            out.push_str(&csv_field(&path.label()));
            out.push(',');
            out.push_str(&csv_field(&scalar_text(&value)));
            out.push('\n');
        }
    }
    out
}

/// Default export filename for a given date: `area-statement-YYYY-MM-DD`.
pub fn default_filename(date: NaiveDate) -> String {
    format!("area-statement-{}", date)
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// RFC 4180 quoting: wrap when the field contains a comma, quote, or newline.
fn csv_field(text: &str) -> String {
    if text.contains(',') || text.contains('"') || text.contains('\n') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}
