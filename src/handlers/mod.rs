pub mod admin_handlers;
pub mod analyze_handlers;
pub mod auth_handlers;
pub mod flash;
pub mod page_handlers;
pub mod scrape_handlers;

pub use admin_handlers::db_viewer_handler;
pub use analyze_handlers::analyze_handler;
pub use auth_handlers::{
    login_page, login_submit, logout_handler, signup_page, signup_submit,
};
pub use page_handlers::{home_handler, index_handler};
pub use scrape_handlers::scrape_handler;

/// Correlation id tying a response to its log lines, e.g. `SCRAPE-17123…`.
pub(crate) fn new_debug_id(prefix: &str) -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{prefix}-{nanos}")
}
