//! Client configuration: backend location and timers.

use std::time::Duration;

use forky_constant::defaults;
use url::Url;

use crate::error::{ClientError, Result};

/// Configuration shared by the chat and ingest flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin, e.g. "http://127.0.0.1:8000"
    pub base_url: String,
    /// Chat endpoint path relative to `base_url`
    pub chat_path: String,
    /// Deadline armed for every chat request
    pub chat_timeout: Duration,
    /// How long a copy button keeps its feedback label
    pub copy_feedback: Duration,
    /// Same, for the full-digest copy button
    pub digest_copy_feedback: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(defaults::BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            chat_path: defaults::CHAT_PATH.to_string(),
            chat_timeout: Duration::from_millis(defaults::CHAT_TIMEOUT_MS),
            copy_feedback: Duration::from_millis(defaults::COPY_FEEDBACK_MS),
            digest_copy_feedback: Duration::from_millis(defaults::DIGEST_COPY_FEEDBACK_MS),
        }
    }

    pub fn with_chat_path(mut self, path: impl Into<String>) -> Self {
        self.chat_path = path.into();
        self
    }

    pub fn with_chat_timeout(mut self, timeout: Duration) -> Self {
        self.chat_timeout = timeout;
        self
    }

    pub fn with_copy_feedback(mut self, copy: Duration, digest: Duration) -> Self {
        self.copy_feedback = copy;
        self.digest_copy_feedback = digest;
        self
    }

    /// Load configuration from environment variables
    ///
    /// Optional: `FORKY_BASE_URL` (default: http://127.0.0.1:8000)
    /// Optional: `FORKY_CHAT_TIMEOUT_MS` (default: 30000)
    pub fn from_env() -> Self {
        let mut config = std::env::var("FORKY_BASE_URL")
            .map(Self::new)
            .unwrap_or_default();

        if let Ok(timeout) = std::env::var("FORKY_CHAT_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse::<u64>() {
                config.chat_timeout = Duration::from_millis(ms);
            }
        }

        config
    }

    /// Parsed `base_url`.
    pub fn base(&self) -> Result<Url> {
        Url::parse(&self.base_url)
            .map_err(|e| ClientError::Config(format!("invalid base url {:?}: {e}", self.base_url)))
    }

    /// Absolute URL of the chat endpoint.
    pub fn chat_url(&self) -> Result<Url> {
        self.resolve(&self.chat_path)
    }

    /// Resolve a form action (absolute or relative) against `base_url`.
    pub fn resolve(&self, action: &str) -> Result<Url> {
        self.base()?
            .join(action)
            .map_err(|e| ClientError::Config(format!("invalid path {action:?}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.chat_path, "/chat");
        assert_eq!(config.chat_timeout, Duration::from_secs(30));
        assert_eq!(config.copy_feedback, Duration::from_secs(1));
        assert_eq!(config.digest_copy_feedback, Duration::from_secs(2));
    }

    #[test]
    fn builder_overrides() {
        let config = ClientConfig::new("http://example.test")
            .with_chat_path("/api/chat")
            .with_chat_timeout(Duration::from_millis(500))
            .with_copy_feedback(Duration::from_millis(10), Duration::from_millis(20));

        assert_eq!(config.chat_url().unwrap().as_str(), "http://example.test/api/chat");
        assert_eq!(config.chat_timeout, Duration::from_millis(500));
        assert_eq!(config.digest_copy_feedback, Duration::from_millis(20));
    }

    #[test]
    fn resolve_relative_and_absolute_actions() {
        let config = ClientConfig::new("http://example.test/app/");
        assert_eq!(config.resolve("/").unwrap().as_str(), "http://example.test/");
        assert_eq!(
            config.resolve("ingest").unwrap().as_str(),
            "http://example.test/app/ingest"
        );
        assert_eq!(
            config.resolve("https://other.test/x").unwrap().as_str(),
            "https://other.test/x"
        );
    }

    #[test]
    fn invalid_base_is_config_error() {
        let config = ClientConfig::new("not a url");
        let err = config.chat_url().unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
