//! PDF text extraction.
//!
//! `pdf-extract` is synchronous and CPU-bound, so it runs on the blocking pool.
//! Pages come back separated by form feeds; links are every `http(s)://` URL
//! found in the text, first occurrence first.

pub mod handlers;

use axum::extract::Multipart;
use bytes::Bytes;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AppError;

/// Multipart field carrying the uploaded document.
pub const PDF_FIELD: &str = "pdf";

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s<>"'()\[\]{}]+"#).expect("URL pattern compiles"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageText {
    pub page_number: usize,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractedPdf {
    pub text: String,
    pub pages: Vec<PageText>,
    pub links: Vec<String>,
}

/// Splits extracted text into pages on form feeds, numbering from 1.
/// Pages with no text are dropped but keep their number.
pub fn split_pages(text: &str) -> Vec<PageText> {
    text.split('\u{c}')
        .enumerate()
        .filter(|(_, content)| !content.trim().is_empty())
        .map(|(i, content)| PageText {
            page_number: i + 1,
            content: content.trim().to_string(),
        })
        .collect()
}

/// Distinct `http(s)` URLs in order of first appearance, without trailing
/// sentence punctuation.
pub fn find_links(text: &str) -> Vec<String> {
    let mut links: Vec<String> = Vec::new();
    for m in URL_RE.find_iter(text) {
        let url = m.as_str().trim_end_matches(['.', ',', ';', ':', '!', '?']);
        if !links.iter().any(|l| l == url) {
            links.push(url.to_string());
        }
    }
    links
}

/// Extracts text from an in-memory PDF. Blank output is `NoContentExtracted`.
pub fn extract_pdf(bytes: &[u8]) -> Result<ExtractedPdf, AppError> {
    let raw = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::Extraction(e.to_string()))?;

    let pages = split_pages(&raw);
    let text = pages
        .iter()
        .map(|p| p.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    if text.trim().is_empty() {
        return Err(AppError::NoContentExtracted);
    }

    let links = find_links(&text);
    debug!(
        pages = pages.len(),
        chars = text.len(),
        links = links.len(),
        "Extracted PDF text"
    );

    Ok(ExtractedPdf { text, pages, links })
}

/// Runs [`extract_pdf`] on the blocking pool.
pub async fn extract_pdf_blocking(bytes: Bytes) -> Result<ExtractedPdf, AppError> {
    tokio::task::spawn_blocking(move || extract_pdf(&bytes))
        .await
        .map_err(|e| AppError::Extraction(format!("extraction task failed: {e}")))?
}

/// Reads the `pdf` field from a multipart upload.
///
/// The field must be present, non-empty and declared as `application/pdf`
/// (or carry a `.pdf` file name when the client sends no content type).
pub async fn read_pdf_field(mut multipart: Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(PDF_FIELD) {
            continue;
        }

        let is_pdf = match field.content_type() {
            Some(ct) => ct.eq_ignore_ascii_case("application/pdf"),
            None => field
                .file_name()
                .is_some_and(|f| f.to_ascii_lowercase().ends_with(".pdf")),
        };
        if !is_pdf {
            return Err(AppError::Validation(
                "Uploaded file must be a PDF (application/pdf)".to_string(),
            ));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        if data.is_empty() {
            return Err(AppError::Validation("Uploaded PDF is empty".to_string()));
        }

        info!(bytes = data.len(), "Received PDF upload");
        return Ok(data);
    }

    Err(AppError::Validation(format!(
        "Missing multipart field '{PDF_FIELD}'"
    )))
}
