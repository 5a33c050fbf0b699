use axum::{
    body::Body,
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use sitelens::{
    app,
    config::session::SessionConfig,
    repositories::user_repository::SqliteUserRepository,
    services::{
        analysis_service::AnalysisService, auth_service::AuthService,
        scrape_service::ScrapeService, user_service::UserService,
    },
    test_utils::test_helpers,
    AppState,
};
use std::sync::Arc;
use tower::ServiceExt;
use tower_sessions_sqlx_store::SqliteStore;

async fn build_app() -> Router {
    let pool = test_helpers::create_test_db().await.unwrap();

    let session_store = SqliteStore::new(pool.clone())
        .with_table_name("sessions")
        .expect("valid session table name");
    session_store.migrate().await.unwrap();
    let session_layer = SessionConfig::from_env().create_layer(session_store);

    let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
    let state = AppState {
        user_service: Arc::new(UserService::new(user_repository.clone())),
        auth_service: Arc::new(AuthService::new(user_repository)),
        scrape_service: Arc::new(ScrapeService::new()),
        analysis_service: Arc::new(AnalysisService::new("test-key")),
        pool,
    };

    app::build_router(state, session_layer)
}

fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn form_request(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn session_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response should set a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_index_redirects_anonymous_to_login() {
    let app = build_app().await;

    let response = app.oneshot(get_request("/", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
}

#[tokio::test]
async fn test_home_is_public() {
    let app = build_app().await;

    let response = app.oneshot(get_request("/home", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_signup_then_login_then_index() {
    let app = build_app().await;

    // Sign up
    let response = app
        .clone()
        .oneshot(form_request(
            "/signup",
            "username=alice&password=password123",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");

    // Login
    let response = app
        .clone()
        .oneshot(form_request(
            "/login",
            "username=alice&password=password123",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
    let cookie = session_cookie(&response);

    // Index now renders for the logged-in user
    let response = app
        .oneshot(get_request("/", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("alice"));
}

#[tokio::test]
async fn test_login_with_wrong_password_rerenders_with_error() {
    let app = build_app().await;

    let response = app
        .clone()
        .oneshot(form_request(
            "/signup",
            "username=bob&password=password123",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .oneshot(form_request("/login", "username=bob&password=wrong", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Invalid username or password"));
}

#[tokio::test]
async fn test_signup_duplicate_username_shows_error() {
    let app = build_app().await;

    let response = app
        .clone()
        .oneshot(form_request(
            "/signup",
            "username=carol&password=password123",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .oneshot(form_request(
            "/signup",
            "username=carol&password=other456",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Username already exists"));
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let app = build_app().await;

    app.clone()
        .oneshot(form_request(
            "/signup",
            "username=dave&password=password123",
            None,
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(form_request(
            "/login",
            "username=dave&password=password123",
            None,
        ))
        .await
        .unwrap();
    let cookie = session_cookie(&response);

    // Logout redirects home
    let response = app
        .clone()
        .oneshot(get_request("/logout", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/home");

    // The old cookie no longer grants access
    let response = app
        .oneshot(get_request("/", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
}
