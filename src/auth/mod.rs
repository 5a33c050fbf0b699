pub mod middleware;

use tower_sessions::Session;

/// Session key holding the logged-in user's id.
pub const USER_ID_KEY: &str = "user_id";

/// Session key holding the logged-in user's name, for page rendering.
pub const USERNAME_KEY: &str = "username";

pub async fn is_authenticated(session: &Session) -> bool {
    matches!(session.get::<i64>(USER_ID_KEY).await, Ok(Some(_)))
}

pub async fn current_user_id(session: &Session) -> Option<i64> {
    session.get::<i64>(USER_ID_KEY).await.ok().flatten()
}
