use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Configuration error
    ConfigError(String),
    /// Training dataset missing, malformed, or empty
    DatasetError(String),
    /// Persisted pipeline artifact missing or unreadable
    ArtifactError(String),
    /// Request failed schema validation
    ValidationError(String),
    /// Model produced an unusable estimate
    PredictionError(String),
    /// Internal server error
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            Self::DatasetError(msg) => write!(f, "Dataset error: {}", msg),
            Self::ArtifactError(msg) => write!(f, "Artifact error: {}", msg),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::PredictionError(msg) => write!(f, "Prediction error: {}", msg),
            Self::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::ConfigError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            Self::DatasetError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            Self::ArtifactError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            Self::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::PredictionError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            Self::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "type": error_type_name(&self),
            }
        }));

        (status, body).into_response()
    }
}

fn error_type_name(error: &AppError) -> &'static str {
    match error {
        AppError::ConfigError(_) => "config_error",
        AppError::DatasetError(_) => "dataset_error",
        AppError::ArtifactError(_) => "artifact_error",
        AppError::ValidationError(_) => "validation_error",
        AppError::PredictionError(_) => "prediction_error",
        AppError::InternalError(_) => "internal_error",
    }
}

// Implement conversions from common error types
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::InternalError(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        Self::DatasetError(err.to_string())
    }
}

impl From<bincode::Error> for AppError {
    fn from(err: bincode::Error) -> Self {
        Self::ArtifactError(format!("serialization error: {}", err))
    }
}
