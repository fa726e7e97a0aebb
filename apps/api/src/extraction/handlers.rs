use axum::{extract::Multipart, Json};

use crate::errors::AppError;
use crate::extraction::{extract_pdf_blocking, read_pdf_field, ExtractedPdf};

/// POST /api/v1/cv/parse-pdf
pub async fn handle_parse_pdf(multipart: Multipart) -> Result<Json<ExtractedPdf>, AppError> {
    let bytes = read_pdf_field(multipart).await?;
    let extracted = extract_pdf_blocking(bytes).await?;
    Ok(Json(extracted))
}
