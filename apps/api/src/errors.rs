use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::typeset::CompileError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No text could be extracted from the document")]
    NoContentExtracted,

    #[error("LaTeX compilation failed: {message}")]
    Compilation { message: String, log_tail: String },

    #[error("LaTeX toolchain unavailable: {0}")]
    ToolchainUnavailable(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<CompileError> for AppError {
    fn from(e: CompileError) -> Self {
        match e {
            CompileError::CompilerNotFound { command } => AppError::ToolchainUnavailable(format!(
                "'{command}' was not found on PATH"
            )),
            CompileError::Failed { status, log_tail } => AppError::Compilation {
                message: format!("compiler exited with {status}"),
                log_tail,
            },
            CompileError::NoOutput { log_tail } => AppError::Compilation {
                message: "compiler produced no PDF".to_string(),
                log_tail,
            },
            CompileError::Timeout { secs } => AppError::Compilation {
                message: format!("compilation timed out after {secs}s"),
                log_tail: String::new(),
            },
            CompileError::Io(e) => AppError::Internal(e.into()),
        }
    }
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::Llm(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg.clone(),
                None,
            ),
            AppError::NoContentExtracted => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "NO_CONTENT_EXTRACTED",
                "No text content could be extracted from the PDF. It may be scanned or image-only."
                    .to_string(),
                None,
            ),
            AppError::Compilation { message, log_tail } => {
                tracing::warn!("LaTeX compilation failed: {message}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "LATEX_COMPILATION_FAILED",
                    format!("LaTeX compilation failed: {message}"),
                    Some(log_tail.clone()),
                )
            }
            AppError::ToolchainUnavailable(msg) => {
                tracing::error!("LaTeX toolchain unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "TOOLCHAIN_UNAVAILABLE",
                    format!("LaTeX toolchain unavailable: {msg}"),
                    None,
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                    None,
                )
            }
            AppError::Extraction(msg) => {
                tracing::error!("Extraction error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXTRACTION_FAILED",
                    "Failed to extract text from the PDF".to_string(),
                    None,
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(details) = details {
            error["details"] = json!(details);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
