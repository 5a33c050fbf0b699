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
pub struct ScrapeForm {
    #[serde(default)]
    pub url: String,
}

pub async fn scrape_handler(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ScrapeForm>,
) -> Response {
    if !is_authenticated(&session).await {
        return AppError::AuthenticationRequired.into_response();
    }

    let debug_id = new_debug_id("SCRAPE");
    tracing::debug!("[{debug_id}] Starting scrape request");

    let url = form.url.trim();
    if url.is_empty() {
        tracing::warn!("[{debug_id}] Empty URL provided");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "URL is required",
                "status": "error",
                "debug_id": debug_id
            })),
        )
            .into_response();
    }

    match state.scrape_service.fetch(url, &debug_id).await {
        Ok(content) => Json(json!({
            "content": content,
            "status": "success",
            "debug_id": debug_id
        }))
        .into_response(),
        Err(e) => {
            tracing::error!("[{debug_id}] Scraping failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": format!("Scraping failed: {e}"),
                    "status": "error",
                    "debug_id": debug_id
                })),
            )
                .into_response()
        }
    }
}
