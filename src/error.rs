//! Error types for the bookshelf server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Response status discriminator carried by every API response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Fail,
}

/// Payload validation failures, checked in declaration order.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please provide a book name.")]
    MissingName,

    #[error("readPage cannot be greater than pageCount.")]
    ReadPageExceedsPageCount,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Rejected payload; `action` names the attempted operation ("add" or
    /// "update") so the message reads like the public API contract.
    #[error("Failed to {action} book. {source}")]
    Validation {
        action: &'static str,
        source: ValidationError,
    },

    #[error("{0}")]
    NotFound(String),
}

impl AppError {
    pub fn validation(action: &'static str, source: ValidationError) -> Self {
        AppError::Validation { action, source }
    }
}

/// Failure response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct FailResponse {
    pub status: Status,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = Json(FailResponse {
            status: Status::Fail,
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
