use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

pub const GENERATION_FAILED_MESSAGE: &str = "unable to generate quiz from provided content";

/// Failure signal of a single pipeline tier. The orchestrator consumes these
/// and moves on to the next tier; they only surface when every tier failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("no JSON-like or plaintext question structure found")]
    ExtractionEmpty,

    #[error("structure found but no question survived normalization")]
    SchemaInvalid,

    #[error("model gateway unreachable: {0}")]
    GatewayUnreachable(String),

    #[error("model gateway error: {0}")]
    GatewayError(String),

    #[error("not enough usable sentences in source text ({usable} found, need 2)")]
    SynthesisInsufficientSource { usable: usize },
}

impl PipelineError {
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::ExtractionEmpty => "extraction_empty",
            PipelineError::SchemaInvalid => "schema_invalid",
            PipelineError::GatewayUnreachable(_) => "gateway_unreachable",
            PipelineError::GatewayError(_) => "gateway_error",
            PipelineError::SynthesisInsufficientSource { .. } => "synthesis_insufficient_source",
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::GenerationFailed(_) => "GENERATION_FAILED",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    pub status: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::GenerationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.error_code(),
            status: self.status_code().as_u16(),
        })
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        log::warn!("quiz generation failed on every tier: {} ({})", err, err.code());
        AppError::GenerationFailed(GENERATION_FAILED_MESSAGE.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
