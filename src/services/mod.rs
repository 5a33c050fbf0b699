pub mod analysis_service;
pub mod auth_service;
pub mod scrape_service;
pub mod user_service;

pub use analysis_service::{AnalysisError, AnalysisService};
pub use auth_service::AuthService;
pub use scrape_service::{ScrapeError, ScrapeService};
pub use user_service::UserService;
