use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{error, info};
use url::Url;

use super::JobApi;
use super::error::RequestError;
use super::models::{
    ActivityEvent, ApiResponse, DeleteConfirmation, HealthInfo, ListQuery, Page,
    PaginatedResponse, SearchQuery, StatusCount,
};
use crate::domain::{Job, JobPatch, JobStatus, NewJob};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub connection_timeout: Duration,
    pub user_agent: String,
    pub enable_compression: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            connection_timeout: Duration::from_secs(5),
            user_agent: format!("job-tracker/{}", env!("CARGO_PKG_VERSION")),
            enable_compression: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionStats {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub average_response_time: Duration,
}

#[derive(Debug, Default)]
pub struct ClientStats {
    total_requests: AtomicU64,
    successful_requests: AtomicU64,
    failed_requests: AtomicU64,
    total_response_time: AtomicU64,
}

impl ClientStats {
    pub fn record_request(&self, success: bool, response_time: Duration) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.total_response_time
            .fetch_add(response_time.as_millis() as u64, Ordering::Relaxed);

        if success {
            self.successful_requests.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed_requests.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> ConnectionStats {
        let total_requests = self.total_requests.load(Ordering::Relaxed);
        let total_response_time = self.total_response_time.load(Ordering::Relaxed);

        let average_response_time = if total_requests > 0 {
            Duration::from_millis(total_response_time / total_requests)
        } else {
            Duration::ZERO
        };

        ConnectionStats {
            total_requests,
            successful_requests: self.successful_requests.load(Ordering::Relaxed),
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
            average_response_time,
        }
    }
}

/// REST client for the job tracker API.
///
/// Each call logs `method path` on dispatch and `status path` (or the error
/// payload) on completion. The logging is a side channel only.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
    base_url: Url,
    stats: Arc<ClientStats>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, RequestError> {
        let base_url: Url = config.base_url.parse().map_err(|e| {
            RequestError::InvalidConfiguration(format!("Invalid base URL '{}': {}", config.base_url, e))
        })?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(RequestError::InvalidConfiguration(format!(
                "Unsupported URL scheme '{}', expected http or https",
                base_url.scheme()
            )));
        }

        let mut client_builder = ClientBuilder::new()
            .timeout(config.timeout)
            .connect_timeout(config.connection_timeout)
            .user_agent(&config.user_agent);

        if config.enable_compression {
            client_builder = client_builder.gzip(true);
        }

        let client = client_builder.build().map_err(|e| {
            RequestError::InvalidConfiguration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            config,
            base_url,
            stats: Arc::new(ClientStats::default()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn connection_stats(&self) -> ConnectionStats {
        self.stats.snapshot()
    }

    fn url_for(&self, segments: &[&str]) -> Result<Url, RequestError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                RequestError::InvalidConfiguration(format!(
                    "Base URL cannot carry a path: {}",
                    self.base_url
                ))
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<(RequestBuilder, Method, String), RequestError> {
        let url = self.url_for(segments)?;
        let path = format!("/{}", segments.join("/"));
        Ok((self.client.request(method.clone(), url), method, path))
    }

    /// Dispatch a prepared request and decode its JSON body.
    async fn send<T: DeserializeOwned>(
        &self,
        (request, method, path): (RequestBuilder, Method, String),
    ) -> Result<T, RequestError> {
        info!(method = %method, path = %path, "API request");
        let start = Instant::now();

        let outcome = timeout(self.config.timeout, async {
            let response = request.send().await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, body))
        })
        .await;

        let (status, body) = match outcome {
            Err(_) => {
                self.stats.record_request(false, start.elapsed());
                error!(method = %method, path = %path, "API request timed out");
                return Err(RequestError::Timeout {
                    method: method.to_string(),
                    path,
                });
            }
            Ok(Err(err)) => {
                self.stats.record_request(false, start.elapsed());
                error!(method = %method, path = %path, error = %err, "API request failed");
                if err.is_timeout() {
                    return Err(RequestError::Timeout {
                        method: method.to_string(),
                        path,
                    });
                }
                return Err(RequestError::Network(err));
            }
            Ok(Ok(parts)) => parts,
        };

        if !status.is_success() {
            self.stats.record_request(false, start.elapsed());
            let message = error_payload(&body);
            error!(status = status.as_u16(), path = %path, payload = %message, "API response error");
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(RequestError::NotFound { path });
            }
            return Err(RequestError::Status {
                status: status.as_u16(),
                message,
            });
        }

        self.stats.record_request(true, start.elapsed());
        info!(status = status.as_u16(), path = %path, "API response");

        serde_json::from_slice(&body).map_err(|e| {
            error!(path = %path, error = %e, "API response body could not be decoded");
            RequestError::Decode(format!("{path}: {e}"))
        })
    }
}

/// Pull the most useful message out of an error body: the envelope's
/// `error` or `message` field, else the raw text.
fn error_payload(body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        for key in ["error", "message"] {
            if let Some(text) = value.get(key).and_then(serde_json::Value::as_str) {
                return text.to_string();
            }
        }
    }
    String::from_utf8_lossy(body).trim().to_string()
}

fn require_id(id: &str) -> Result<&str, RequestError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(RequestError::InvalidRequest("job id must not be empty".to_string()));
    }
    Ok(trimmed)
}

#[async_trait]
impl JobApi for ApiClient {
    async fn list_jobs(&self, query: ListQuery) -> Result<Page<Job>, RequestError> {
        let (request, method, path) = self.request(Method::GET, &["jobs"])?;
        self.send::<PaginatedResponse<Job>>((request.query(&query), method, path))
            .await?
            .into_page()
    }

    async fn get_job(&self, id: &str) -> Result<Job, RequestError> {
        let id = require_id(id)?;
        let prepared = self.request(Method::GET, &["jobs", id])?;
        self.send::<ApiResponse<Job>>(prepared).await?.into_data()
    }

    async fn create_job(&self, job: NewJob) -> Result<Job, RequestError> {
        let (request, method, path) = self.request(Method::POST, &["jobs"])?;
        self.send::<ApiResponse<Job>>((request.json(&job), method, path))
            .await?
            .into_data()
    }

    async fn update_job_status(&self, id: &str, status: JobStatus) -> Result<Job, RequestError> {
        let id = require_id(id)?;
        let (request, method, path) = self.request(Method::PUT, &["jobs", id, "status"])?;
        let body = serde_json::json!({ "status": status });
        self.send::<ApiResponse<Job>>((request.json(&body), method, path))
            .await?
            .into_data()
    }

    async fn update_job(&self, id: &str, patch: JobPatch) -> Result<Job, RequestError> {
        let id = require_id(id)?;
        let (request, method, path) = self.request(Method::PUT, &["jobs", id])?;
        self.send::<ApiResponse<Job>>((request.json(&patch), method, path))
            .await?
            .into_data()
    }

    async fn delete_job(&self, id: &str) -> Result<String, RequestError> {
        let id = require_id(id)?;
        let prepared = self.request(Method::DELETE, &["jobs", id])?;
        self.send::<ApiResponse<DeleteConfirmation>>(prepared)
            .await?
            .into_data()
            .map(|confirmation| confirmation.message)
    }

    async fn search_jobs(&self, query: SearchQuery) -> Result<Page<Job>, RequestError> {
        let (request, method, path) = self.request(Method::GET, &["jobs", "search"])?;
        self.send::<PaginatedResponse<Job>>((request.query(&query), method, path))
            .await?
            .into_page()
    }

    async fn status_statistics(&self) -> Result<Vec<StatusCount>, RequestError> {
        let prepared = self.request(Method::GET, &["jobs", "statistics"])?;
        self.send::<ApiResponse<Vec<StatusCount>>>(prepared)
            .await?
            .into_data()
    }

    async fn recent_activity(&self, limit: u32) -> Result<Vec<ActivityEvent>, RequestError> {
        let (request, method, path) = self.request(Method::GET, &["jobs", "activity"])?;
        self.send::<ApiResponse<Vec<ActivityEvent>>>((request.query(&[("limit", limit)]), method, path))
            .await?
            .into_data()
    }

    async fn health(&self) -> Result<HealthInfo, RequestError> {
        let prepared = self.request(Method::GET, &["health"])?;
        self.send::<ApiResponse<HealthInfo>>(prepared).await?.into_data()
    }
}
