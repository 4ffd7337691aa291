//! Loggly client configuration

use crate::core::{LogglyError, Result};
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://logs-01.loggly.com/";
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;
pub const DEFAULT_WORKER_THREADS: usize = 2;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

fn default_worker_threads() -> usize {
    DEFAULT_WORKER_THREADS
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    concat!("loggly_tree/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Settings for [`crate::client::LogglyClient`]
///
/// Every field except `token` has a default, so the struct can be
/// deserialized from a section of an application's config file.
///
/// # Example
///
/// ```
/// use loggly_tree::client::LogglyConfig;
///
/// let config = LogglyConfig::new("0a1b2c3d-0000-4e5f-8a9b-0c1d2e3f4a5b")
///     .with_queue_capacity(256)
///     .with_worker_threads(1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogglyConfig {
    /// Customer token from the Loggly source setup page
    pub token: String,

    /// Base URL of the input API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Submissions waiting for a worker before new ones are rejected
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    #[serde(default = "default_worker_threads")]
    pub worker_threads: usize,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl LogglyConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            endpoint: default_endpoint(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            worker_threads: DEFAULT_WORKER_THREADS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: default_user_agent(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_secs = timeout.as_secs().max(1);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Check every field, returning the first problem found
    pub fn validate(&self) -> Result<()> {
        if self.token.is_empty() {
            return Err(LogglyError::config("LogglyConfig", "token is empty"));
        }
        if !self
            .token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(LogglyError::config(
                "LogglyConfig",
                "token may only contain ASCII letters, digits and '-'",
            ));
        }
        if self.queue_capacity == 0 {
            return Err(LogglyError::config("LogglyConfig", "queue_capacity must be > 0"));
        }
        if self.worker_threads == 0 {
            return Err(LogglyError::config("LogglyConfig", "worker_threads must be > 0"));
        }
        if self.request_timeout_secs == 0 {
            return Err(LogglyError::config("LogglyConfig", "request_timeout_secs must be > 0"));
        }
        self.input_url()?;
        Ok(())
    }

    /// Endpoint with a guaranteed trailing slash
    pub fn base_url(&self) -> Result<Url> {
        let mut endpoint = self.endpoint.clone();
        if !endpoint.ends_with('/') {
            endpoint.push('/');
        }

        let url = Url::parse(&endpoint).map_err(|e| {
            LogglyError::config("LogglyConfig", format!("invalid endpoint '{}': {}", self.endpoint, e))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(LogglyError::config(
                "LogglyConfig",
                format!("unsupported endpoint scheme '{}'", other),
            )),
        }
    }

    /// URL receiving single events: `{endpoint}inputs/{token}`
    pub fn input_url(&self) -> Result<Url> {
        self.base_url()?
            .join(&format!("inputs/{}", self.token))
            .map_err(|e| LogglyError::config("LogglyConfig", format!("invalid input URL: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "0a1b2c3d-0000-4e5f-8a9b-0c1d2e3f4a5b";

    #[test]
    fn test_defaults() {
        let config = LogglyConfig::new(TOKEN);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.queue_capacity, DEFAULT_QUEUE_CAPACITY);
        assert_eq!(config.worker_threads, DEFAULT_WORKER_THREADS);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.user_agent.starts_with("loggly_tree/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_input_url() {
        let url = LogglyConfig::new("abc-123").input_url().unwrap();
        assert_eq!(url.as_str(), "https://logs-01.loggly.com/inputs/abc-123");

        let url = LogglyConfig::new("abc-123")
            .with_endpoint("http://127.0.0.1:8080/loggly")
            .input_url()
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/loggly/inputs/abc-123");
    }

    #[test]
    fn test_invalid_tokens() {
        for token in ["", "has space", "slash/token", "quote\""] {
            let err = LogglyConfig::new(token).validate().unwrap_err();
            assert!(matches!(err, LogglyError::InvalidConfiguration { .. }), "{:?}", token);
        }
    }

    #[test]
    fn test_invalid_settings() {
        assert!(LogglyConfig::new(TOKEN).with_queue_capacity(0).validate().is_err());
        assert!(LogglyConfig::new(TOKEN).with_worker_threads(0).validate().is_err());
        assert!(LogglyConfig::new(TOKEN).with_endpoint("not a url").validate().is_err());
        assert!(LogglyConfig::new(TOKEN).with_endpoint("ftp://logs.example.com").validate().is_err());
    }

    #[test]
    fn test_request_timeout_rounds_up_to_one_second() {
        let config = LogglyConfig::new(TOKEN).with_request_timeout(Duration::from_millis(10));
        assert_eq!(config.request_timeout_secs, 1);
    }
}
