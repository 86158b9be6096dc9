//! Application error types and their HTTP translation.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    /// The extraction model call failed or returned no usable text
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// The extraction output was not a valid array of interaction records
    #[error("invalid extraction output: {0}")]
    Parse(String),

    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Extraction(_) | Self::Parse(_) | Self::Database(_) | Self::Csv(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        match &self {
            AppError::NotFound { .. } | AppError::Validation(_) => {
                tracing::debug!(%message, "client error");
            }
            _ => {
                tracing::error!(%message, error = ?self, "request failed");
            }
        }

        // Not-found carries a bare message; everything else the failure envelope
        let body = match &self {
            AppError::NotFound { .. } => Json(json!({ "message": message })),
            _ => Json(json!({ "success": false, "message": message })),
        };

        (status, body).into_response()
    }
}
