//! Upload and document validation.
//!
//! Two rejection layers guard an upload: byte-level file checks (content
//! type, emptiness, size, JSON parse) and structural checks (required
//! top-level keys). Every violated rule is collected and surfaced verbatim;
//! a failing upload is rejected whole, never partially accepted.

use crate::models::{parse_statement_json_str, AreaStatement, REQUIRED_KEYS};

/// Uploads above this size are rejected.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// File-level rejection: wrong type, oversized, empty, or unparseable JSON.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}", .reasons.join("; "))]
pub struct UploadError {
    pub reasons: Vec<String>,
}

impl UploadError {
    fn single(reason: impl Into<String>) -> Self {
        Self {
            reasons: vec![reason.into()],
        }
    }
}

/// Structural rejection: required top-level keys are missing.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}", missing_list(.missing))]
pub struct StructureError {
    pub missing: Vec<String>,
}

fn missing_list(missing: &[String]) -> String {
    missing
        .iter()
        .map(|key| format!("Missing required property: {}", key))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate an uploaded file's bytes and parse them into a statement.
///
/// All byte-level violations are reported together; parsing is attempted
/// only once the bytes pass. Structural validation is a separate step so the
/// caller controls the error taxonomy.
pub fn parse_upload(
    content_type: Option<&str>,
    bytes: &[u8],
) -> Result<AreaStatement, UploadError> {
    let mut reasons = Vec::new();

    let is_json = content_type
        .map(|ct| ct.split(';').next().unwrap_or("").trim() == "application/json")
        .unwrap_or(false);
    if !is_json {
        reasons.push("File must be a JSON file".to_string());
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        reasons.push("File size must be less than 10MB".to_string());
    }
    if bytes.is_empty() {
        reasons.push("File cannot be empty".to_string());
    }
    if !reasons.is_empty() {
        log::warn!("upload rejected: {}", reasons.join("; "));
        return Err(UploadError { reasons });
    }

    let text = std::str::from_utf8(bytes)
        .map_err(|_| UploadError::single("File is not valid UTF-8 text"))?;
    parse_statement_json_str(text).map_err(|e| UploadError::single(format!("{:#}", e)))
}

/// Check that every required top-level key is present, listing all misses.
pub fn validate_statement(statement: &AreaStatement) -> Result<(), StructureError> {
    let missing: Vec<String> = REQUIRED_KEYS
        .iter()
        .filter(|key| !statement.fields().contains_key(**key))
        .map(|key| key.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        log::warn!("statement rejected, missing keys: {}", missing.join(", "));
        Err(StructureError { missing })
    }
}
