use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Embedding failed: {0}")]
    EmbeddingFailure(String),

    #[error("Vector index is empty; no corpus has been indexed yet")]
    IndexEmpty,

    #[error("Failed to build vector index: {0}")]
    IndexBuildFailure(String),

    #[error("Failed to load corpus: {0}")]
    DataLoad(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let error = ErrorResponse {
            error: self.to_string(),
        };

        match self {
            ApiError::InvalidRequest(_) => HttpResponse::BadRequest().json(error),
            ApiError::EmbeddingFailure(_) => HttpResponse::UnprocessableEntity().json(error),
            ApiError::IndexEmpty => HttpResponse::ServiceUnavailable().json(error),
            _ => HttpResponse::InternalServerError().json(error),
        }
    }
}

impl From<csv::Error> for ApiError {
    fn from(err: csv::Error) -> Self {
        ApiError::DataLoad(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}
