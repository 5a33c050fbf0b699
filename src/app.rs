use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{auth, config::session::SessionLayer, handlers, AppState};

/// Assembles the full route table. Split out of `main` so integration tests
/// can drive the app through `tower::ServiceExt::oneshot`.
pub fn build_router(state: AppState, session_layer: SessionLayer) -> Router {
    let protected_pages = Router::new()
        .route("/", get(handlers::index_handler))
        .route(
            "/admin/db-viewer",
            get(handlers::db_viewer_handler).post(handlers::db_viewer_handler),
        )
        .layer(middleware::from_fn(auth::middleware::require_auth));

    Router::new()
        .merge(protected_pages)
        .route("/home", get(handlers::home_handler))
        .route(
            "/login",
            get(handlers::login_page).post(handlers::login_submit),
        )
        .route(
            "/signup",
            get(handlers::signup_page).post(handlers::signup_submit),
        )
        .route("/logout", get(handlers::logout_handler))
        // JSON endpoints; these answer 401 themselves instead of redirecting
        .route("/scrape", post(handlers::scrape_handler))
        .route("/analyze", post(handlers::analyze_handler))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
