//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::services::{GenerateError, StructureError, UploadError};
use crate::store::StoreError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Unknown session or resource
    NotFound(String),
    /// Invalid request (bad path, bad format parameter, malformed body)
    BadRequest(String),
    /// File-level upload rejection
    Upload(UploadError),
    /// Missing required statement keys
    Structure(StructureError),
    /// Schedule generation failure; review state survives for a retry
    Generate(GenerateError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Upload(e) => (
                StatusCode::BAD_REQUEST,
                ApiError::new("FILE_ERROR", e.to_string()),
            ),
            AppError::Structure(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::new("VALIDATION_ERROR", e.to_string()),
            ),
            AppError::Generate(e) => {
                // The raw response rides along for debugging failed parses.
                let details = match &e {
                    GenerateError::NoJsonObject { raw } => Some(raw.clone()),
                    GenerateError::Parse { raw, .. } => Some(raw.clone()),
                    GenerateError::Api { body, .. } => Some(body.clone()),
                    GenerateError::Request(_) => None,
                };
                let mut api = ApiError::new("SCHEDULE_GENERATION_ERROR", e.to_string());
                if let Some(details) = details {
                    api = api.with_details(details);
                }
                (StatusCode::BAD_GATEWAY, api)
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        AppError::Upload(err)
    }
}

impl From<StructureError> for AppError {
    fn from(err: StructureError) -> Self {
        AppError::Structure(err)
    }
}

impl From<GenerateError> for AppError {
    fn from(err: GenerateError) -> Self {
        AppError::Generate(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::SessionNotFound(_) => AppError::NotFound(err.to_string()),
            StoreError::Edit(e) => AppError::BadRequest(e.to_string()),
        }
    }
}
