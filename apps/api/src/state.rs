use std::sync::Arc;

use crate::config::Config;
use crate::structuring::CvStructurer;
use crate::typeset::DocumentCompiler;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable text-to-document step. Default: LlmCvStructurer.
    pub structurer: Arc<dyn CvStructurer>,
    /// Pluggable LaTeX compiler. Default: PdfLatexCompiler.
    pub compiler: Arc<dyn DocumentCompiler>,
}
