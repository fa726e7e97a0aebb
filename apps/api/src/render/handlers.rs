use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::cv::CvDocument;
use crate::errors::AppError;
use crate::render::render;
use crate::state::AppState;

pub const PDF_FILENAME: &str = "resume.pdf";

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    #[serde(alias = "cvData")]
    pub cv_data: CvDocument,
}

#[derive(Debug, Serialize)]
pub struct LatexResponse {
    pub latex: String,
}

async fn compile(state: &AppState, doc: &CvDocument) -> Result<Bytes, AppError> {
    let latex = render(doc);
    Ok(state.compiler.compile(&latex).await?)
}

fn pdf_response(pdf: Bytes, disposition: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("{disposition}; filename=\"{PDF_FILENAME}\""),
            ),
        ],
        pdf,
    )
        .into_response()
}

/// POST /api/v1/render/latex
pub async fn handle_render_latex(Json(req): Json<RenderRequest>) -> Json<LatexResponse> {
    Json(LatexResponse {
        latex: render(&req.cv_data),
    })
}

/// POST /api/v1/render/pdf
/// Returns the compiled PDF as a download.
pub async fn handle_render_pdf(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Result<Response, AppError> {
    let pdf = compile(&state, &req.cv_data).await?;
    Ok(pdf_response(pdf, "attachment"))
}

/// POST /api/v1/render/preview
/// Returns the compiled PDF for display in the browser.
pub async fn handle_render_preview(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Result<Response, AppError> {
    let pdf = compile(&state, &req.cv_data).await?;
    Ok(pdf_response(pdf, "inline"))
}
