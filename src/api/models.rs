use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::error::RequestError;
use crate::domain::{JobStatus, Pagination, Submission};

/// `{success, data}` envelope used by every single-value endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Unwrap the payload, turning `success: false` or a missing `data`
    /// field into a request error.
    pub fn into_data(self) -> Result<T, RequestError> {
        if !self.success {
            return Err(RequestError::Rejected {
                message: self
                    .error
                    .or(self.message)
                    .unwrap_or_else(|| "server reported failure".to_string()),
            });
        }
        self.data
            .ok_or_else(|| RequestError::Decode("response envelope has no data".to_string()))
    }
}

/// `{success, data: [...], pagination}` envelope used by list and search.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse<T> {
    pub success: bool,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    pub pagination: Option<Pagination>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> PaginatedResponse<T> {
    pub fn into_page(self) -> Result<Page<T>, RequestError> {
        if !self.success {
            return Err(RequestError::Rejected {
                message: self
                    .error
                    .or(self.message)
                    .unwrap_or_else(|| "server reported failure".to_string()),
            });
        }
        let pagination = self
            .pagination
            .ok_or_else(|| RequestError::Decode("paginated response has no pagination".to_string()))?;
        Ok(Page {
            items: self.data,
            pagination,
        })
    }
}

/// One page of records plus its window metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Query string of `GET /jobs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub sort_by: String,
    pub sort_order: SortOrder,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            sort_by: "createdAt".to_string(),
            sort_order: SortOrder::Desc,
        }
    }
}

/// Query string of `GET /jobs/search`. Absent criteria are not sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    pub page: u32,
    pub limit: u32,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            role: None,
            company: None,
            status: None,
            page: 1,
            limit: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeleteConfirmation {
    pub message: String,
}

/// Per-status job count. Jobs that were never submitted are grouped under
/// `Submission::Unsubmitted`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusCount {
    #[serde(default)]
    pub status: Submission,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    pub job_id: String,
    pub role: String,
    pub company: String,
    pub status: JobStatus,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthInfo {
    pub message: String,
    pub timestamp: String,
    pub environment: String,
}
