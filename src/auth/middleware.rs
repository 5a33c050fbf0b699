use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use super::USER_ID_KEY;

/// Page routes behind this middleware bounce anonymous visitors to the login
/// form. JSON routes do their own check and answer 401 instead.
pub async fn require_auth(session: Session, request: Request, next: Next) -> Response {
    if let Ok(Some(_user_id)) = session.get::<i64>(USER_ID_KEY).await {
        next.run(request).await
    } else {
        Redirect::to("/login").into_response()
    }
}
