//! Run configuration types

use crate::task::UrlSet;
use serde::{Deserialize, Serialize};

/// Benchmark run configuration
///
/// Defines which URLs to hit, how many requests to issue in total and how
/// many workers issue them concurrently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Target URLs
    pub urls: UrlSet,

    /// Total number of requests to schedule
    pub requests: usize,

    /// Number of concurrent workers
    pub concurrency: usize,
}

impl BenchConfig {
    /// Create a config issuing one request with one worker
    pub fn new(urls: impl Into<UrlSet>) -> Self {
        Self {
            urls: urls.into(),
            requests: 1,
            concurrency: 1,
        }
    }

    /// Set the total request count
    pub fn with_requests(mut self, requests: usize) -> Self {
        self.requests = requests;
        self
    }

    /// Set the concurrency level
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Validate the configuration
    ///
    /// Must pass before any task source is built for the run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency(
                "concurrency must be at least 1".into(),
            ));
        }

        if self.urls.is_empty() {
            return Err(ConfigError::MissingUrls);
        }

        if let Some(blank) = self.urls.iter().position(|url| url.trim().is_empty()) {
            return Err(ConfigError::InvalidUrl(format!("URL #{} is blank", blank + 1)));
        }

        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid concurrency value
    #[error("Invalid concurrency: {0}")]
    InvalidConcurrency(String),

    /// No URL was supplied
    #[error("need one or more URLs")]
    MissingUrls,

    /// A supplied URL is unusable
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_counts() {
        let config = BenchConfig::new("http://localhost/");
        assert_eq!(config.requests, 1);
        assert_eq!(config.concurrency, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder_pattern() {
        let config = BenchConfig::new(vec!["http://a/".to_string(), "http://b/".to_string()])
            .with_requests(100)
            .with_concurrency(10);

        assert_eq!(config.requests, 100);
        assert_eq!(config.concurrency, 10);
        assert_eq!(config.urls.len(), 2);
    }

    #[test]
    fn test_zero_requests_is_valid() {
        let config = BenchConfig::new("http://localhost/").with_requests(0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = BenchConfig::new("http://localhost/").with_concurrency(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidConcurrency(_))
        ));
    }

    #[test]
    fn test_empty_url_list_rejected() {
        let config = BenchConfig::new(Vec::<String>::new());
        assert!(matches!(config.validate(), Err(ConfigError::MissingUrls)));
    }

    #[test]
    fn test_blank_url_rejected() {
        let config = BenchConfig::new(vec!["http://a/".to_string(), "  ".to_string()]);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("#2"));
    }

    #[test]
    fn test_config_serialization() {
        let config = BenchConfig::new("http://localhost/").with_concurrency(5);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: BenchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.concurrency, 5);
    }
}
