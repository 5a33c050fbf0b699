use askama::Template;
use askama_web::WebTemplate;
use axum::response::{Html, IntoResponse, Response};
use tower_sessions::Session;

use super::flash::{take_flashes, Flash};
use crate::auth::USERNAME_KEY;

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
struct IndexTemplate {
    username: String,
    flashes: Vec<Flash>,
}

#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
struct HomeTemplate {
    flashes: Vec<Flash>,
}

/// Workbench page. Sits behind `require_auth`, so the session always carries
/// a user here.
pub async fn index_handler(session: Session) -> Response {
    let username = session
        .get::<String>(USERNAME_KEY)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();
    let flashes = take_flashes(&session).await;

    let template = IndexTemplate { username, flashes };
    Html(
        template
            .render()
            .unwrap_or_else(|_| "Template error".to_string()),
    )
    .into_response()
}

pub async fn home_handler(session: Session) -> Response {
    let flashes = take_flashes(&session).await;

    let template = HomeTemplate { flashes };
    Html(
        template
            .render()
            .unwrap_or_else(|_| "Template error".to_string()),
    )
    .into_response()
}
