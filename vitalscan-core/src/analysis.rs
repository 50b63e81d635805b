//! Analysis service transport
//!
//! A single request/response boundary: the full captured frame sequence goes
//! out in one `POST /analyze` body, and the canned demo path is one
//! `GET /quick_demo`. No chunking, no retries, no streaming.

use crate::error::VitalScanError;
use crate::frame::Frame;
use crate::wire::{AnalysisResult, AnalyzeRequest};
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Default demo pacing: the demo result is withheld until at least this much
/// time has passed, so the UI always shows a processing state
pub const DEFAULT_DEMO_PACING: Duration = Duration::from_millis(3000);

/// Default request timeout for analysis round trips
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Remote analysis seam.
///
/// Implementations issue at most one in-flight request per invocation and
/// hold no queue; preventing overlapping calls is the session controller's
/// responsibility.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Submit a captured frame sequence for analysis
    async fn analyze(&self, frames: &[Frame]) -> Result<AnalysisResult, VitalScanError>;

    /// Trigger the canned demo analysis
    async fn demo(&self) -> Result<AnalysisResult, VitalScanError>;
}

/// Configuration for [`HttpAnalysisClient`]
#[derive(Debug, Clone)]
pub struct AnalysisClientConfig {
    /// Base URL of the analysis service
    pub base_url: String,
    /// Timeout applied to each round trip
    pub request_timeout: Duration,
    /// Minimum total latency imposed on the demo path
    pub demo_pacing: Duration,
}

impl Default for AnalysisClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            demo_pacing: DEFAULT_DEMO_PACING,
        }
    }
}

/// HTTP client for the analysis service
#[derive(Debug, Clone)]
pub struct HttpAnalysisClient {
    http: reqwest::Client,
    config: AnalysisClientConfig,
}

impl HttpAnalysisClient {
    /// Create a client for the given service configuration
    pub fn new(config: AnalysisClientConfig) -> Result<Self, VitalScanError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| VitalScanError::Network {
                reason: format!("failed to build HTTP client: {err}"),
            })?;
        Ok(Self { http, config })
    }

    /// Service configuration in use
    pub fn config(&self) -> &AnalysisClientConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn read_result(
        &self,
        response: reqwest::Response,
    ) -> Result<AnalysisResult, VitalScanError> {
        // Any non-2xx status is a transport-level failure regardless of body.
        let status = response.status();
        if !status.is_success() {
            return Err(VitalScanError::Network {
                reason: format!("analysis service returned {status}"),
            });
        }
        response
            .json::<AnalysisResult>()
            .await
            .map_err(|err| VitalScanError::Network {
                reason: format!("invalid analysis response body: {err}"),
            })
    }
}

#[async_trait]
impl AnalysisBackend for HttpAnalysisClient {
    async fn analyze(&self, frames: &[Frame]) -> Result<AnalysisResult, VitalScanError> {
        let request = AnalyzeRequest::from_frames(frames);
        debug!(frames = frames.len(), "submitting capture batch for analysis");
        let response = self
            .http
            .post(self.endpoint("analyze"))
            .json(&request)
            .send()
            .await
            .map_err(|err| VitalScanError::Network {
                reason: err.to_string(),
            })?;
        let result = self.read_result(response).await?;
        debug!(success = result.success, "analysis response received");
        Ok(result)
    }

    async fn demo(&self) -> Result<AnalysisResult, VitalScanError> {
        debug!("requesting demo analysis");
        let request = async {
            self.http
                .get(self.endpoint("quick_demo"))
                .send()
                .await
                .map_err(|err| VitalScanError::Network {
                    reason: err.to_string(),
                })
        };
        let response = with_pacing_floor(self.config.demo_pacing, request).await?;
        self.read_result(response).await
    }
}

/// Withhold a future's output until at least `floor` has elapsed.
///
/// The result becomes available at `max(latency, floor)`: a fast response
/// waits out the floor, a slow one is never delayed further.
pub async fn with_pacing_floor<T>(floor: Duration, fut: impl Future<Output = T>) -> T {
    let (value, _) = tokio::join!(fut, tokio::time::sleep(floor));
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_pacing_floor_delays_fast_results() {
        let started = Instant::now();
        let value = with_pacing_floor(Duration::from_millis(3000), async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            7
        })
        .await;
        assert_eq!(value, 7);
        assert!(started.elapsed() >= Duration::from_millis(3000));
        assert!(started.elapsed() < Duration::from_millis(3100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pacing_floor_adds_nothing_to_slow_results() {
        let started = Instant::now();
        let value = with_pacing_floor(Duration::from_millis(3000), async {
            tokio::time::sleep(Duration::from_millis(4500)).await;
            7
        })
        .await;
        assert_eq!(value, 7);
        assert!(started.elapsed() >= Duration::from_millis(4500));
        assert!(started.elapsed() < Duration::from_millis(4600));
    }

    #[test]
    fn test_endpoint_joining_tolerates_trailing_slash() {
        let client = HttpAnalysisClient::new(AnalysisClientConfig {
            base_url: "http://localhost:5000/".to_string(),
            ..AnalysisClientConfig::default()
        })
        .unwrap();
        assert_eq!(client.endpoint("analyze"), "http://localhost:5000/analyze");
    }
}
