//! API client layer: typed calls against the job tracker REST service.

pub mod client;
pub mod error;
pub mod models;

pub use client::{ApiClient, ClientConfig, ClientStats, ConnectionStats, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::RequestError;
pub use models::{
    ActivityEvent, ApiResponse, DeleteConfirmation, HealthInfo, ListQuery, Page, PaginatedResponse,
    SearchQuery, SortOrder, StatusCount,
};

use async_trait::async_trait;

use crate::domain::{Job, JobPatch, JobStatus, NewJob};

#[cfg(test)]
use mockall::automock;

/// One operation per remote capability. A `success: false` envelope is
/// reported as `RequestError::Rejected`, so callers only ever see the
/// payload or a single error.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait JobApi: Send + Sync {
    async fn list_jobs(&self, query: ListQuery) -> Result<Page<Job>, RequestError>;

    async fn get_job(&self, id: &str) -> Result<Job, RequestError>;

    async fn create_job(&self, job: NewJob) -> Result<Job, RequestError>;

    async fn update_job_status(&self, id: &str, status: JobStatus) -> Result<Job, RequestError>;

    async fn update_job(&self, id: &str, patch: JobPatch) -> Result<Job, RequestError>;

    /// Returns the server's confirmation message.
    async fn delete_job(&self, id: &str) -> Result<String, RequestError>;

    async fn search_jobs(&self, query: SearchQuery) -> Result<Page<Job>, RequestError>;

    async fn status_statistics(&self) -> Result<Vec<StatusCount>, RequestError>;

    async fn recent_activity(&self, limit: u32) -> Result<Vec<ActivityEvent>, RequestError>;

    async fn health(&self) -> Result<HealthInfo, RequestError>;
}
