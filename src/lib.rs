pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod services;

// Make test_utils available for both unit tests and integration tests
pub mod test_utils;

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<services::user_service::UserService>,
    pub auth_service: Arc<services::auth_service::AuthService>,
    pub scrape_service: Arc<services::scrape_service::ScrapeService>,
    pub analysis_service: Arc<services::analysis_service::AnalysisService>,
    pub pool: sqlx::SqlitePool,
}
