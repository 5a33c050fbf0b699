//! Scrape gateway: fetches the raw textual content of a page.
//!
//! A thin wrapper over a shared `reqwest::Client`. Failures from the
//! underlying client surface as `ScrapeError` with the original message;
//! there is no retry and no explicit timeout.

/// Declared fetch cap. Not currently enforced on responses.
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Request failed: {0}")]
    Upstream(String),

    #[error("Upstream returned HTTP {0}")]
    Status(u16),
}

/// Safe to share across threads; `reqwest::Client` pools connections
/// internally.
#[derive(Clone)]
pub struct ScrapeService {
    client: reqwest::Client,
}

impl Default for ScrapeService {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrapeService {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Prefix bare hosts with `https://` so users can submit `example.com`.
    pub fn normalize_url(url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("https://{url}")
        }
    }

    pub async fn fetch(&self, url: &str, debug_id: &str) -> Result<String, ScrapeError> {
        let url = Self::normalize_url(url);
        tracing::debug!("[{debug_id}] Starting scrape of {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ScrapeError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ScrapeError::Upstream(e.to_string()))?;

        tracing::debug!("[{debug_id}] Scrape completed ({} bytes)", body.len());
        Ok(body)
    }
}
