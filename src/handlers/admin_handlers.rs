use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::auth::current_user_id;
use crate::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "admin/users.html")]
struct AdminUsersTemplate {
    users: Vec<UserRow>,
}

struct UserRow {
    username: String,
    is_admin: bool,
    created_at: String,
}

/// Lists registered users. Gated on the `is_admin` role of the logged-in
/// user; there is no separate admin password.
pub async fn db_viewer_handler(State(state): State<AppState>, session: Session) -> Response {
    let user_id = match current_user_id(&session).await {
        Some(id) => id,
        None => return Redirect::to("/login").into_response(),
    };

    let user = match state.auth_service.get_user_by_id(user_id).await {
        Ok(user) => user,
        Err(_) => return Redirect::to("/login").into_response(),
    };

    if !user.is_admin {
        tracing::warn!("User {} denied access to the user list", user.username);
        return (StatusCode::FORBIDDEN, "Forbidden").into_response();
    }

    let users = match state.user_service.list_users(None, None).await {
        Ok(users) => users,
        Err(e) => {
            tracing::error!("Failed to list users: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response();
        }
    };

    let rows = users
        .into_iter()
        .map(|u| UserRow {
            username: u.username,
            is_admin: u.is_admin,
            created_at: u.created_at.unwrap_or_default(),
        })
        .collect();

    let template = AdminUsersTemplate { users: rows };
    Html(
        template
            .render()
            .unwrap_or_else(|_| "Template error".to_string()),
    )
    .into_response()
}
