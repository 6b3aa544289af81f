use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::error;

use crate::{color::ColorError, config::ConfigError, database::StoreError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload")]
    MalformedPayload,

    #[error("No {0} provided")]
    MissingField(&'static str),

    #[error("Invalid hex color format")]
    InvalidColor(#[from] ColorError),

    #[error("No average color available")]
    NoAverage,

    #[error("No user found with this base color")]
    UnknownBaseColor,

    #[error("Internal error: {0}")]
    Store(#[from] StoreError),

    #[error("Background task failed: {0}")]
    Task(#[from] JoinError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MalformedPayload { .. }
            | AppError::MissingField { .. }
            | AppError::InvalidColor { .. }
            | AppError::NoAverage => StatusCode::BAD_REQUEST,
            AppError::UnknownBaseColor => StatusCode::NOT_FOUND,
            AppError::Store { .. } | AppError::Task { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self {
            AppError::Store(_) | AppError::Task(_) => {
                error!("Request failed: {self}");
                "Internal error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}
