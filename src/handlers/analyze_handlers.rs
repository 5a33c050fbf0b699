use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;

use super::new_debug_id;
use crate::auth::is_authenticated;
use crate::error::AppError;
use crate::AppState;

#[derive(Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub prompt: String,
}

pub async fn analyze_handler(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AnalyzeForm>,
) -> Response {
    if !is_authenticated(&session).await {
        return AppError::AuthenticationRequired.into_response();
    }

    let debug_id = new_debug_id("ANALYZE");
    tracing::debug!("[{debug_id}] Starting analysis request");

    let content = form.content.trim();
    let prompt = form.prompt.trim();

    if content.is_empty() {
        tracing::warn!("[{debug_id}] Empty content provided");
        return validation_error("Content is required", &debug_id);
    }
    if prompt.is_empty() {
        tracing::warn!("[{debug_id}] Empty prompt provided");
        return validation_error("Prompt is required", &debug_id);
    }

    match state.analysis_service.analyze(content, prompt).await {
        Ok(analysis) => Json(json!({
            "analysis": analysis,
            "status": "success"
        }))
        .into_response(),
        Err(e) => {
            tracing::error!("[{debug_id}] Analysis failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": format!("Analysis failed: {e}"),
                    "status": "error",
                    "debug_id": debug_id
                })),
            )
                .into_response()
        }
    }
}

fn validation_error(message: &str, debug_id: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": message,
            "status": "error",
            "debug_id": debug_id
        })),
    )
        .into_response()
}
