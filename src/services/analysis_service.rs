//! Analysis gateway: sends scraped content plus a user prompt to Gemini and
//! returns a cleaned, markdown-friendly response.
//!
//! The cleanup pipeline is the one hand-rolled piece of this service and its
//! order matters: truncate at the trailing metadata marker, upgrade
//! single-asterisk emphasis to bold, then turn newlines into markdown hard
//! line breaks.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Matches runs of asterisks around a single-line span of non-asterisk text.
/// Only runs of exactly one asterisk on both sides are rewritten; `**bold**`
/// and spans crossing a newline are left alone.
static EMPHASIS_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\*+)([^*\n]+)(\*+)").unwrap());

/// Everything from this marker on is trailing agent metadata, not content.
const RESPONSE_MARKER: &str = "content_type=";

const GEMINI_MODEL: &str = "gemini-2.0-flash-exp";
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const GEMINI_TEMPERATURE: f64 = 0.2;

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Missing API key or invalid settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection failed or the response body could not be read
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response from the model API
    #[error("API error: {0}")]
    Api(String),

    /// Invalid JSON or unexpected response shape
    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Clone)]
pub struct AnalysisService {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl AnalysisService {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    /// Create from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, AnalysisError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| AnalysisError::Config("GEMINI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies and tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub async fn analyze(&self, content: &str, prompt: &str) -> Result<String, AnalysisError> {
        let full_prompt = format!("Based on this website content:\n\n{content}\n\n{prompt}");
        let raw = self.generate(&full_prompt).await?;
        Ok(clean_response(&raw))
    }

    async fn generate(&self, prompt: &str) -> Result<String, AnalysisError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, GEMINI_MODEL);
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "temperature": GEMINI_TEMPERATURE }
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(AnalysisError::Api(format!("HTTP {status}: {text}")));
        }

        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| AnalysisError::Parse(e.to_string()))?;

        let parts = value
            .pointer("/candidates/0/content/parts")
            .and_then(|p| p.as_array())
            .ok_or_else(|| AnalysisError::Parse("response has no candidates".into()))?;

        let mut out = String::new();
        for part in parts {
            if let Some(text) = part.get("text").and_then(|t| t.as_str()) {
                out.push_str(text);
            }
        }

        Ok(out)
    }
}

/// Clean a raw model response for markdown rendering.
pub fn clean_response(raw: &str) -> String {
    let truncated = match raw.split_once(RESPONSE_MARKER) {
        Some((head, _)) => head,
        None => raw,
    };

    let emphasized = EMPHASIS_RUNS.replace_all(truncated, |caps: &Captures| {
        if &caps[1] == "*" && &caps[3] == "*" {
            format!("**{}**", &caps[2])
        } else {
            caps[0].to_string()
        }
    });

    // Markdown needs two trailing spaces for a hard line break
    emphasized.replace('\n', "  \n")
}
