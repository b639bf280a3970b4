//! Site-specific error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::SharedError;
use thiserror::Error;

/// Message shown in the error banner whenever an analysis does not succeed.
pub const ANALYSIS_FAILED_MESSAGE: &str = "Failed to process image. Please try again.";

/// The only failure an analyzer can report. Carries no detail; implementations
/// log the cause before returning it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("image analysis failed")]
pub struct AnalysisFailed;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server startup error: {0}")]
    ServerStartup(String),

    #[error("Image not found: {id}")]
    ImageNotFound { id: String },

    #[error("Invalid upload: {details}")]
    InvalidUpload { details: String },

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SiteError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn invalid_upload(details: impl Into<String>) -> Self {
        Self::InvalidUpload {
            details: details.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            SiteError::ImageNotFound { .. } => StatusCode::NOT_FOUND,
            SiteError::InvalidUpload { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

pub type SiteResult<T> = Result<T, SiteError>;
