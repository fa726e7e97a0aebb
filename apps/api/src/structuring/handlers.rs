use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::cv::CvDocument;
use crate::errors::AppError;
use crate::extraction::{extract_pdf_blocking, read_pdf_field};
use crate::render::render;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    #[serde(default, alias = "extractedText")]
    pub extracted_text: String,
}

#[derive(Debug, Serialize)]
pub struct ProcessingInfo {
    pub method: String,
    pub fallback_used: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub id: Uuid,
    pub cv_data: CvDocument,
    pub latex: String,
    pub processing: ProcessingInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
}

/// Structures `text` and renders the result.
async fn process_text(state: &AppState, text: &str) -> Result<ProcessResponse, AppError> {
    let structured = state.structurer.structure(text).await?;
    let latex = render(&structured.document);

    let id = Uuid::new_v4();
    info!(
        %id,
        method = %structured.method,
        fallback_used = structured.fallback_used,
        latex_bytes = latex.len(),
        "Processed CV"
    );

    Ok(ProcessResponse {
        id,
        cv_data: structured.document,
        latex,
        processing: ProcessingInfo {
            method: structured.method,
            fallback_used: structured.fallback_used,
            timestamp: Utc::now(),
        },
        extracted_text: None,
    })
}

/// POST /api/v1/cv/process
pub async fn handle_process(
    State(state): State<AppState>,
    Json(req): Json<ProcessRequest>,
) -> Result<Json<ProcessResponse>, AppError> {
    if req.extracted_text.trim().is_empty() {
        return Err(AppError::Validation(
            "No text provided for processing".to_string(),
        ));
    }
    Ok(Json(process_text(&state, &req.extracted_text).await?))
}

/// POST /api/v1/cv/upload
/// Extraction and processing in one call.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ProcessResponse>, AppError> {
    let bytes = read_pdf_field(multipart).await?;
    let extracted = extract_pdf_blocking(bytes).await?;

    let mut response = process_text(&state, &extracted.text).await?;
    response.extracted_text = Some(extracted.text);
    Ok(Json(response))
}
