//! Single-request execution and measurement

use crate::result::RequestResult;
use crate::traits::HttpClient;

use std::sync::Arc;
use std::time::Instant;

/// Performs one GET and turns the outcome into a [`RequestResult`]
///
/// Transport errors never escape: they become failed results carrying the
/// error kind, so one bad target cannot abort a run.
#[derive(Clone)]
pub struct RequestExecutor {
    client: Arc<dyn HttpClient>,
}

impl RequestExecutor {
    /// Create an executor around a shared client
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self { client }
    }

    /// Fetch `url` and measure it
    pub async fn fetch(&self, url: &str) -> RequestResult {
        let start = Instant::now();
        match self.client.get(url).await {
            Ok(response) => {
                let result =
                    RequestResult::success(start.elapsed(), response.body_size, response.status);
                match response.detail_time {
                    Some(detail) => result.with_detail_time(detail),
                    None => result,
                }
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "Request failed");
                RequestResult::failure(e.to_error_kind())
            }
        }
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("client", &self.client.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::result::{DetailTime, FAILED_STATUS};
    use crate::traits::{FetchError, HttpResponse};
    use async_trait::async_trait;
    use std::time::Duration;

    struct FixedClient {
        outcome: fn() -> Result<HttpResponse, FetchError>,
        delay: Duration,
    }

    #[async_trait]
    impl HttpClient for FixedClient {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn get(&self, _url: &str) -> Result<HttpResponse, FetchError> {
            tokio::time::sleep(self.delay).await;
            (self.outcome)()
        }
    }

    fn executor(outcome: fn() -> Result<HttpResponse, FetchError>, delay: Duration) -> RequestExecutor {
        RequestExecutor::new(Arc::new(FixedClient { outcome, delay }))
    }

    #[tokio::test]
    async fn test_fetch_success_measures_elapsed() {
        let exec = executor(|| Ok(HttpResponse::new(200, 42)), Duration::from_millis(20));
        let result = exec.fetch("http://a/").await;

        assert_eq!(result.status_code(), 200);
        assert_eq!(result.body_size(), 42);
        assert!(result.elapsed_seconds() >= 0.02);
        assert!(result.error().is_none());
    }

    #[tokio::test]
    async fn test_fetch_failure_becomes_sentinel_result() {
        let exec = executor(
            || Err(FetchError::Connect("refused".into())),
            Duration::from_millis(5),
        );
        let result = exec.fetch("http://a/").await;

        assert_eq!(result.status_code(), FAILED_STATUS);
        assert_eq!(result.body_size(), 0);
        assert_eq!(result.elapsed_seconds(), 0.0);
        assert_eq!(result.error(), Some(ErrorKind::Connect));
    }

    #[tokio::test]
    async fn test_fetch_keeps_detail_time() {
        let exec = executor(
            || {
                Ok(HttpResponse {
                    status: 200,
                    body_size: 1,
                    detail_time: Some(DetailTime::new(0.001, 0.002, 0.003)),
                })
            },
            Duration::ZERO,
        );
        let result = exec.fetch("http://a/").await;
        assert_eq!(
            result.detail_time(),
            Some(&DetailTime::new(0.001, 0.002, 0.003))
        );
    }

    #[test]
    fn test_executor_debug_format() {
        let exec = executor(|| Ok(HttpResponse::new(200, 0)), Duration::ZERO);
        let debug = format!("{:?}", exec);
        assert!(debug.contains("RequestExecutor"));
        assert!(debug.contains("fixed"));
    }
}
