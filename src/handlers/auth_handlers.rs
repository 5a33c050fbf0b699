use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use super::flash::{push_flash, take_flashes, Flash};
use crate::auth::{USERNAME_KEY, USER_ID_KEY};
use crate::services::auth_service::LoginRequest;
use crate::services::user_service::{RegisterRequest, UserServiceError};
use crate::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
struct LoginTemplate {
    flashes: Vec<Flash>,
}

#[derive(Template, WebTemplate)]
#[template(path = "signup.html")]
struct SignupTemplate {
    flashes: Vec<Flash>,
}

#[derive(Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

fn render_login(flashes: Vec<Flash>) -> Response {
    let template = LoginTemplate { flashes };
    Html(
        template
            .render()
            .unwrap_or_else(|_| "Template error".to_string()),
    )
    .into_response()
}

fn render_signup(flashes: Vec<Flash>) -> Response {
    let template = SignupTemplate { flashes };
    Html(
        template
            .render()
            .unwrap_or_else(|_| "Template error".to_string()),
    )
    .into_response()
}

pub async fn login_page(session: Session) -> Response {
    render_login(take_flashes(&session).await)
}

pub async fn login_submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Response {
    let request = LoginRequest {
        username: form.username,
        password: form.password,
    };

    match state.auth_service.authenticate(request).await {
        Ok(user) => {
            if session.insert(USER_ID_KEY, user.id).await.is_err()
                || session
                    .insert(USERNAME_KEY, user.username.clone())
                    .await
                    .is_err()
            {
                tracing::error!("Failed to write session for user {}", user.username);
                let mut flashes = take_flashes(&session).await;
                flashes.push(Flash::new("danger", "Failed to create session"));
                return render_login(flashes);
            }

            push_flash(&session, "success", "Logged in successfully!").await;
            Redirect::to("/").into_response()
        }
        Err(_) => {
            // Unknown user and wrong password render identically
            let mut flashes = take_flashes(&session).await;
            flashes.push(Flash::new("danger", "Invalid username or password"));
            render_login(flashes)
        }
    }
}

pub async fn signup_page(session: Session) -> Response {
    render_signup(take_flashes(&session).await)
}

pub async fn signup_submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Response {
    let request = RegisterRequest {
        username: form.username,
        password: form.password,
    };

    match state.user_service.register(request).await {
        Ok(user) => {
            tracing::info!("New user registered: {}", user.username);
            push_flash(
                &session,
                "success",
                "Account created successfully! Please login.",
            )
            .await;
            Redirect::to("/login").into_response()
        }
        Err(e) => {
            let message = match e {
                UserServiceError::UsernameTaken => "Username already exists".to_string(),
                UserServiceError::MissingUsername | UserServiceError::MissingPassword => {
                    e.to_string()
                }
                other => {
                    tracing::error!("Signup failed: {other}");
                    "Signup failed. Please try again.".to_string()
                }
            };
            let mut flashes = take_flashes(&session).await;
            flashes.push(Flash::new("danger", &message));
            render_signup(flashes)
        }
    }
}

/// Drops the user keys but keeps the session row alive so the goodbye flash
/// survives the redirect.
pub async fn logout_handler(session: Session) -> Response {
    let _ = session.remove::<i64>(USER_ID_KEY).await;
    let _ = session.remove::<String>(USERNAME_KEY).await;
    push_flash(&session, "info", "Logged out successfully!").await;
    Redirect::to("/home").into_response()
}
