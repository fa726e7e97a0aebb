use axum::{extract::State, Json};

use crate::state::AppState;
use crate::typeset::ToolchainReport;

/// GET /api/v1/latex/check
pub async fn handle_check_latex(State(state): State<AppState>) -> Json<ToolchainReport> {
    Json(state.compiler.check().await)
}
