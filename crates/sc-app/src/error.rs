use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sc_core::Stage;
use sc_core::error::ExportError;
use sc_shape::PipelineError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("could not read .env: {0}")]
    EnvFile(#[from] dotenvy::Error),
}

/// Everything that can go wrong between a parsed request and a record
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("export task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl GenerateError {
    pub fn stage(&self) -> Stage {
        Stage::ModelGeneration
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "detail": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
