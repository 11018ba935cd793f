//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for the actual work.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use super::dto::{
    AnalyticsData, EditRequest, ExportQuery, ExportResponse, FieldRowDto, FieldsResponse,
    GenerateRequest, HealthResponse, ScheduleResponse, ScheduleResult, SessionListResponse,
    SessionSummaryDto, StatementResponse, UploadQuery,
};
use super::error::AppError;
use super::state::AppState;
use crate::services::flatten::{flatten, FieldPath};
use crate::services::generator::ScheduleGenerator;
use crate::services::{analytics, export, validation};
use crate::store::Session;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

fn fields_response(session: &Session) -> FieldsResponse {
    FieldsResponse {
        session: SessionSummaryDto::from(session),
        fields: flatten(session.statement.fields())
            .into_iter()
            .map(FieldRowDto::from)
            .collect(),
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        sessions: state.store.len(),
    }))
}

// =============================================================================
// Statement Upload & Sessions
// =============================================================================

/// POST /v1/statements
///
/// Upload an area statement JSON file. The body is the raw file content;
/// file-level checks, parsing, and required-key validation all happen before
/// a session is created, so a rejected upload leaves no partial state.
pub async fn upload_statement(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<FieldsResponse>), AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    let statement = validation::parse_upload(content_type, &body)?;
    validation::validate_statement(&statement)?;

    let session = state.store.create(statement, query.filename);
    Ok((StatusCode::CREATED, Json(fields_response(&session))))
}

/// GET /v1/statements
///
/// List all active review sessions.
pub async fn list_sessions(State(state): State<AppState>) -> HandlerResult<SessionListResponse> {
    let sessions: Vec<SessionSummaryDto> = state
        .store
        .list()
        .iter()
        .map(SessionSummaryDto::from)
        .collect();
    let total = sessions.len();

    Ok(Json(SessionListResponse { sessions, total }))
}

/// GET /v1/statements/{session_id}
///
/// Get the current document for a session.
pub async fn get_statement(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> HandlerResult<StatementResponse> {
    let session = state.store.get(session_id)?;

    Ok(Json(StatementResponse {
        session: SessionSummaryDto::from(&session),
        statement: serde_json::Value::Object(session.statement.fields().clone()),
    }))
}

/// DELETE /v1/statements/{session_id}
///
/// Discard a session and its document.
pub async fn delete_statement(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.store.remove(session_id)?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Review Table
// =============================================================================

/// GET /v1/statements/{session_id}/fields
///
/// Get the flattened review table for a session's current document.
pub async fn get_fields(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> HandlerResult<FieldsResponse> {
    let session = state.store.get(session_id)?;
    Ok(Json(fields_response(&session)))
}

/// PATCH /v1/statements/{session_id}/fields
///
/// Apply one leaf edit. The document is replaced wholesale with the edited
/// version; the response carries the new version and the refreshed table.
pub async fn edit_field(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<EditRequest>,
) -> HandlerResult<FieldsResponse> {
    let path = FieldPath::new(request.path);
    let session = state.store.apply_edit(session_id, &path, &request.value)?;
    Ok(Json(fields_response(&session)))
}

// =============================================================================
// Analytics & Schedule
// =============================================================================

/// GET /v1/statements/{session_id}/analytics
///
/// Compute derived analytics for the current document.
pub async fn get_analytics(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> HandlerResult<AnalyticsData> {
    let session = state.store.get(session_id)?;
    Ok(Json(analytics::calculate_analytics(&session.statement)))
}

/// GET /v1/statements/{session_id}/schedule
///
/// Synthesize the deterministic 19-phase schedule, referenced to today.
pub async fn get_schedule(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> HandlerResult<ScheduleResponse> {
    let session = state.store.get(session_id)?;
    let today = Utc::now().date_naive();

    Ok(Json(ScheduleResponse {
        generated_on: today,
        sections: crate::services::schedule::synthesize_schedule(&session.statement, today),
    }))
}

/// POST /v1/statements/{session_id}/schedule/generate
///
/// Generate a schedule via the AI generator. A failure is terminal for this
/// request only; the session is untouched and the client may retry.
pub async fn generate_schedule(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<GenerateRequest>,
) -> HandlerResult<ScheduleResult> {
    let session = state.store.get(session_id)?;

    #[cfg(feature = "openai")]
    {
        use crate::services::openai::{OpenAiGenerator, DEFAULT_MODEL};

        let model = request.model.as_deref().unwrap_or(DEFAULT_MODEL);
        let generator = OpenAiGenerator::with_model(request.api_key, model);
        Ok(Json(generator.generate(&session.statement).await?))
    }

    // Without the openai feature the local synthesizer serves as the
    // fallback implementation of the same interface.
    #[cfg(not(feature = "openai"))]
    {
        let _ = request;
        let generator = crate::services::generator::LocalSynthesizer;
        Ok(Json(generator.generate(&session.statement).await?))
    }
}

// =============================================================================
// Export
// =============================================================================

/// GET /v1/statements/{session_id}/export?format=json|csv
///
/// Render the current document for download.
pub async fn export_statement(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<ExportQuery>,
) -> HandlerResult<ExportResponse> {
    let session = state.store.get(session_id)?;
    let format = query.format.as_deref().unwrap_or("json");
    let stem = export::default_filename(Utc::now().date_naive());

    let (content, extension) = match format {
        "json" => (export::to_pretty_json(&session.statement), "json"),
        "csv" => (export::to_csv(&session.statement), "csv"),
        other => {
            return Err(AppError::BadRequest(format!(
                "Unsupported export format '{}', expected 'json' or 'csv'",
                other
            )))
        }
    };

    Ok(Json(ExportResponse {
        filename: format!("{}.{}", stem, extension),
        format: extension.to_string(),
        content,
    }))
}
