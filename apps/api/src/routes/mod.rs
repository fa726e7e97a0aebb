pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers as extraction;
use crate::render::handlers as render;
use crate::state::AppState;
use crate::structuring::handlers as structuring;
use crate::typeset::handlers as typeset;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/latex/check", get(typeset::handle_check_latex))
        // Ingestion
        .route("/api/v1/cv/parse-pdf", post(extraction::handle_parse_pdf))
        .route("/api/v1/cv/process", post(structuring::handle_process))
        .route("/api/v1/cv/upload", post(structuring::handle_upload))
        // Rendering
        .route("/api/v1/render/latex", post(render::handle_render_latex))
        .route("/api/v1/render/pdf", post(render::handle_render_pdf))
        .route("/api/v1/render/preview", post(render::handle_render_preview))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use bytes::Bytes;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::errors::AppError;
    use crate::structuring::{fallback_document, CvStructurer, StructuredCv};
    use crate::typeset::{CompileError, DocumentCompiler, ToolchainReport, INSTALL_GUIDE};

    struct EchoStructurer;

    #[async_trait]
    impl CvStructurer for EchoStructurer {
        async fn structure(&self, text: &str) -> Result<StructuredCv, AppError> {
            Ok(StructuredCv {
                document: fallback_document(text),
                method: "echo".to_string(),
                fallback_used: true,
            })
        }
    }

    struct StubCompiler {
        fail: bool,
    }

    #[async_trait]
    impl DocumentCompiler for StubCompiler {
        async fn compile(&self, latex: &str) -> Result<Bytes, CompileError> {
            assert!(latex.starts_with("\\documentclass"));
            if self.fail {
                return Err(CompileError::Failed {
                    status: "exit status: 1".to_string(),
                    log_tail: "! LaTeX Error: File `missing.sty' not found.".to_string(),
                });
            }
            Ok(Bytes::from_static(b"%PDF-1.5 stub"))
        }

        async fn check(&self) -> ToolchainReport {
            ToolchainReport {
                status: "ready",
                compiler: "stub".to_string(),
                found: true,
                path: None,
                version: Some("stub 1.0".to_string()),
                packages: vec!["hyperref".to_string()],
                missing_packages: Vec::new(),
                errors: Vec::new(),
                installation_guide: INSTALL_GUIDE,
            }
        }
    }

    fn app(fail_compile: bool) -> Router {
        let config = Config {
            anthropic_api_key: "test".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            latex_cmd: "pdflatex".to_string(),
            latex_passes: 1,
            latex_timeout_secs: 5,
            max_upload_bytes: 1024 * 1024,
        };
        build_router(AppState {
            config,
            structurer: Arc::new(EchoStructurer),
            compiler: Arc::new(StubCompiler { fail: fail_compile }),
        })
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn post_multipart(uri: &str, field: &str, content_type: &str, data: &str) -> Request<Body> {
        let body = format!(
            "--XBOUNDARY\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"cv.pdf\"\r\n\
             Content-Type: {content_type}\r\n\r\n\
             {data}\r\n\
             --XBOUNDARY--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                "multipart/form-data; boundary=XBOUNDARY",
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn cv_data() -> Value {
        json!({
            "cv_template": {
                "metadata": {"section_order": ["header", "experience"]},
                "sections": {
                    "header": {"name": "A. Smith", "title": ""},
                    "experience": {
                        "section_title": "Experience",
                        "items": [{
                            "title": "Engineer",
                            "company": "Acme",
                            "dates": {"start": "2020-01-01", "end": "", "is_current": true},
                            "achievements": ["Shipped X"]
                        }]
                    }
                },
                "rendering_rules": {"date_format": "YYYY-MM", "hide_empty_sections": true}
            }
        })
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(false)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "cvtex");
    }

    #[tokio::test]
    async fn test_render_latex() {
        let response = app(false)
            .oneshot(post_json("/api/v1/render/latex", json!({"cv_data": cv_data()})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let latex = body["latex"].as_str().unwrap();
        assert!(latex.contains("{Acme}{2020-01 -- Present}"));
        assert!(latex.contains("\\resumeItem{Shipped X}"));
    }

    #[tokio::test]
    async fn test_render_pdf_is_an_attachment() {
        let response = app(false)
            .oneshot(post_json("/api/v1/render/pdf", json!({"cv_data": cv_data()})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/pdf"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"resume.pdf\""
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_render_preview_is_inline() {
        let response = app(false)
            .oneshot(post_json(
                "/api/v1/render/preview",
                json!({"cvData": cv_data()}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .starts_with("inline"));
    }

    #[tokio::test]
    async fn test_compile_failure_returns_log_tail() {
        let response = app(true)
            .oneshot(post_json("/api/v1/render/pdf", json!({"cv_data": cv_data()})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "LATEX_COMPILATION_FAILED");
        assert!(body["error"]["details"]
            .as_str()
            .unwrap()
            .contains("missing.sty"));
    }

    #[tokio::test]
    async fn test_process_rejects_blank_text() {
        let response = app(false)
            .oneshot(post_json(
                "/api/v1/cv/process",
                json!({"extracted_text": "   "}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_process_returns_document_and_latex() {
        let response = app(false)
            .oneshot(post_json(
                "/api/v1/cv/process",
                json!({"extractedText": "Jane Doe\n\nRust & LaTeX"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["processing"]["method"], "echo");
        assert_eq!(body["processing"]["fallback_used"], true);
        assert!(body["cv_data"]["cv_template"]["sections"]["custom"].is_object());
        assert!(body["latex"].as_str().unwrap().contains(r"Rust \& LaTeX"));
        assert!(body.get("extracted_text").is_none());
    }

    #[tokio::test]
    async fn test_latex_check_reports_toolchain() {
        let response = app(false)
            .oneshot(
                Request::get("/api/v1/latex/check")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ready");
        assert_eq!(body["packages"], json!(["hyperref"]));
        assert!(body["installation_guide"]["ubuntu"].is_string());
    }

    #[tokio::test]
    async fn test_parse_pdf_requires_pdf_field() {
        let response = app(false)
            .oneshot(post_multipart(
                "/api/v1/cv/parse-pdf",
                "document",
                "application/pdf",
                "%PDF-1.5",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("'pdf'"));
    }

    #[tokio::test]
    async fn test_upload_rejects_non_pdf() {
        let response = app(false)
            .oneshot(post_multipart(
                "/api/v1/cv/upload",
                "pdf",
                "text/plain",
                "hello",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
