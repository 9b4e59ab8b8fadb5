//! `HttpClient` implementation over reqwest

use crate::config::HttpClientConfig;
use async_trait::async_trait;
use loadbench_core::{FetchError, HttpClient, HttpResponse};
use std::error::Error as _;

/// Errors raised while building the client
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// reqwest rejected the client configuration
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Pooled reqwest client
///
/// `reqwest::Client` is internally reference counted and safe to use from
/// many tasks at once; each request checks out its own connection.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
    config: HttpClientConfig,
}

impl ReqwestClient {
    /// Build a client from configuration
    pub fn new(config: HttpClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone());
        if let Some(connect_timeout) = config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        let client = builder.build()?;
        tracing::debug!(
            timeout = ?config.timeout,
            connect_timeout = ?config.connect_timeout,
            "HTTP client created"
        );
        Ok(Self { client, config })
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.config.timeout)
        } else if err.is_builder() {
            FetchError::InvalidUrl(err.to_string())
        } else if err.is_connect() {
            if is_dns_failure(&err) {
                FetchError::Dns(error_chain(&err))
            } else {
                FetchError::Connect(error_chain(&err))
            }
        } else if err.is_body() || err.is_decode() || err.is_request() {
            FetchError::Protocol(error_chain(&err))
        } else {
            FetchError::Other(error_chain(&err))
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    fn name(&self) -> &str {
        "reqwest"
    }

    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        Ok(HttpResponse::new(status, body.len()))
    }
}

/// Render an error with all of its sources, outermost first
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

// hyper-util reports resolver failures as connect errors; the cause text is
// the only stable marker.
fn is_dns_failure(err: &reqwest::Error) -> bool {
    let chain = error_chain(err).to_ascii_lowercase();
    chain.contains("dns error") || chain.contains("failed to lookup address")
}
