use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::{JobStatus, Submission};

/// One status change recorded by the server. History is append-only and
/// insertion order is chronological.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    pub status: JobStatus,
    pub timestamp: DateTime<Utc>,
}

/// A tracked job application as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(rename = "_id")]
    pub id: String,
    pub role: String,
    pub company: String,
    #[serde(default)]
    pub status: Submission,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub history: Vec<StatusHistoryEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// True once the job has any status, i.e. it has entered the pipeline.
    pub fn has_applied(&self) -> bool {
        self.status.is_submitted()
    }

    /// Most recent history entry, if any.
    pub fn latest_change(&self) -> Option<&StatusHistoryEntry> {
        self.history.last()
    }
}

/// Body of `POST /jobs`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct NewJob {
    pub role: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `PUT /jobs/:id`. Only the fields that are `Some` are sent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct JobPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl JobPatch {
    pub fn is_empty(&self) -> bool {
        self.role.is_none()
            && self.company.is_none()
            && self.status.is_none()
            && self.location.is_none()
            && self.salary.is_none()
            && self.description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "_id": "665f1c2ab1",
            "role": "Engineer",
            "company": "Acme",
            "status": "Interviewed",
            "location": "Berlin",
            "appliedDate": "2025-01-02T10:00:00Z",
            "history": [
                { "status": "Applied", "timestamp": "2025-01-02T10:00:00Z" },
                { "status": "Interviewed", "timestamp": "2025-01-09T15:30:00Z" }
            ],
            "createdAt": "2025-01-01T09:00:00Z",
            "updatedAt": "2025-01-09T15:30:00Z"
        })
    }

    #[test]
    fn decodes_server_job_shape() {
        let job: Job = serde_json::from_value(sample_json()).unwrap();
        assert_eq!(job.id, "665f1c2ab1");
        assert_eq!(job.status, Submission::Submitted(JobStatus::Interviewed));
        assert_eq!(job.location.as_deref(), Some("Berlin"));
        assert!(job.salary.is_none());
        assert_eq!(job.history.len(), 2);
        assert_eq!(job.latest_change().unwrap().status, JobStatus::Interviewed);
        assert!(job.has_applied());
    }

    #[test]
    fn missing_status_and_history_decode_as_new_job() {
        let mut value = sample_json();
        let object = value.as_object_mut().unwrap();
        object.remove("status");
        object.remove("history");
        let job: Job = serde_json::from_value(value).unwrap();
        assert_eq!(job.status, Submission::Unsubmitted);
        assert!(job.history.is_empty());
        assert!(!job.has_applied());
    }

    #[test]
    fn new_job_omits_absent_optional_fields() {
        let body = NewJob {
            role: "X".into(),
            company: "Y".into(),
            ..NewJob::default()
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "role": "X", "company": "Y" })
        );
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        let patch = JobPatch {
            salary: Some("$100k".into()),
            ..JobPatch::default()
        };
        assert!(!patch.is_empty());
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({ "salary": "$100k" })
        );
        assert!(JobPatch::default().is_empty());
    }
}
