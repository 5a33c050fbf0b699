use sitelens::{
    app,
    config::session::{validate_production_config, SessionConfig},
    db, AppState,
};

use sitelens::repositories::user_repository::SqliteUserRepository;
use sitelens::services::{
    analysis_service::AnalysisService, auth_service::AuthService, scrape_service::ScrapeService,
    user_service::UserService,
};
use std::{net::SocketAddr, sync::Arc};
use tower_sessions_sqlx_store::SqliteStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sitelens=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // The analysis gateway is useless without a key, so refuse to start
    let analysis_service = match AnalysisService::from_env() {
        Ok(service) => Arc::new(service),
        Err(e) => {
            tracing::error!("Refusing to start: {e}");
            anyhow::bail!("{e}");
        }
    };

    // Database connection and migrations
    let pool = db::create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Wire repositories and services
    let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
    let user_service = Arc::new(UserService::new(user_repository.clone()));
    let auth_service = Arc::new(AuthService::new(user_repository));
    let scrape_service = Arc::new(ScrapeService::new());

    let app_state = AppState {
        user_service,
        auth_service,
        scrape_service,
        analysis_service,
        pool: pool.clone(),
    };

    // Session store
    validate_production_config();
    let session_store = SqliteStore::new(pool)
        .with_table_name("sessions")
        .expect("Invalid session table name for sessions");
    session_store.migrate().await?;

    let session_layer = SessionConfig::from_env().create_layer(session_store);

    let app = app::build_router(app_state, session_layer);

    // Start server
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()?;

    let addr = SocketAddr::from((host.parse::<std::net::IpAddr>()?, port));

    tracing::info!("Server running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
