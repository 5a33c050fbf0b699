use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::env;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/sitelens.db?mode=rwc";

pub async fn create_pool() -> Result<SqlitePool, sqlx::Error> {
    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

    // Ensure the data directory exists for file-backed databases
    let path = database_url.replace("sqlite://", "");
    let path = path.split('?').next().unwrap_or(&path);
    if let Some(parent) = std::path::Path::new(path).parent() {
        std::fs::create_dir_all(parent).ok();
    }

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
}
