//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! The schedule and generation payloads are re-exported from the service
//! layer since they already derive Serialize/Deserialize.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// Re-export service payloads that are already serializable
pub use crate::services::analytics::AnalyticsData;
pub use crate::services::generator::{GanttTask, GeneratedTask, ScheduleResult};
pub use crate::services::schedule::{ScheduleSection, ScheduleSections, ScheduleTask};

use crate::services::flatten::{FieldPath, FlatRow};
use crate::store::Session;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Number of active review sessions
    pub sessions: usize,
}

/// Query parameters for statement upload.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UploadQuery {
    /// Original filename, if the client wants it echoed in exports
    #[serde(default)]
    pub filename: Option<String>,
}

/// Session metadata DTO for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummaryDto {
    pub session_id: Uuid,
    pub filename: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    pub version: u64,
    pub checksum: String,
}

impl From<&Session> for SessionSummaryDto {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.id,
            filename: session.filename.clone(),
            uploaded_at: session.uploaded_at,
            version: session.version,
            checksum: session.checksum.clone(),
        }
    }
}

/// Session list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionSummaryDto>,
    pub total: usize,
}

/// One row of the review table, label included for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldRowDto {
    pub kind: String,
    pub path: FieldPath,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl From<FlatRow> for FieldRowDto {
    fn from(row: FlatRow) -> Self {
        match row {
            FlatRow::Section { path } => Self {
                kind: "section".to_string(),
                label: path.label(),
                path,
                value: None,
            },
            FlatRow::Leaf { path, value } => Self {
                kind: "leaf".to_string(),
                label: path.label(),
                path,
                value: Some(value),
            },
        }
    }
}

/// Review table response: session metadata plus the flattened rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldsResponse {
    pub session: SessionSummaryDto,
    pub fields: Vec<FieldRowDto>,
}

/// Full document response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementResponse {
    pub session: SessionSummaryDto,
    pub statement: Value,
}

/// Request body for a single field edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditRequest {
    /// Path segments addressing one leaf
    pub path: Vec<String>,
    /// Raw text the user typed; coercion happens server-side
    pub value: String,
}

/// Request body for AI-backed schedule generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// User-supplied API credential, never stored
    pub api_key: String,
    /// Optional model override
    #[serde(default)]
    pub model: Option<String>,
}

/// Locally synthesized schedule response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub generated_on: NaiveDate,
    pub sections: ScheduleSections,
}

/// Query parameters for the export endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExportQuery {
    /// "json" (default) or "csv"
    #[serde(default)]
    pub format: Option<String>,
}

/// Export response carrying the rendered document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResponse {
    pub filename: String,
    pub format: String,
    pub content: String,
}
