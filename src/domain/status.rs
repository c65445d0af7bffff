use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Pipeline stage of a submitted application.
///
/// Declaration order is the intended progression, but no transition is
/// enforced: any status can be selected from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum JobStatus {
    Applied,
    Reviewed,
    Interviewed,
    Offered,
    Rejected,
}

impl JobStatus {
    pub const ALL: [JobStatus; 5] = [
        JobStatus::Applied,
        JobStatus::Reviewed,
        JobStatus::Interviewed,
        JobStatus::Offered,
        JobStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Applied => "Applied",
            JobStatus::Reviewed => "Reviewed",
            JobStatus::Interviewed => "Interviewed",
            JobStatus::Offered => "Offered",
            JobStatus::Rejected => "Rejected",
        }
    }

    /// Badge icon shown next to the status name.
    pub fn icon(self) -> &'static str {
        match self {
            JobStatus::Applied => "📝",
            JobStatus::Reviewed => "👀",
            JobStatus::Interviewed => "🤝",
            JobStatus::Offered => "🎉",
            JobStatus::Rejected => "❌",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown job status '{0}' (expected one of Applied, Reviewed, Interviewed, Offered, Rejected)")]
pub struct UnknownStatus(pub String);

impl FromStr for JobStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Whether a job has entered the application pipeline.
///
/// The server encodes `Unsubmitted` as `null`, a missing field or an empty
/// string; all three decode to the same variant and it is always encoded
/// back as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Submission {
    #[default]
    Unsubmitted,
    Submitted(JobStatus),
}

impl Submission {
    pub fn status(self) -> Option<JobStatus> {
        match self {
            Submission::Unsubmitted => None,
            Submission::Submitted(status) => Some(status),
        }
    }

    pub fn is_submitted(self) -> bool {
        matches!(self, Submission::Submitted(_))
    }
}

impl From<JobStatus> for Submission {
    fn from(status: JobStatus) -> Self {
        Submission::Submitted(status)
    }
}

impl From<Option<JobStatus>> for Submission {
    fn from(status: Option<JobStatus>) -> Self {
        status.map_or(Submission::Unsubmitted, Submission::Submitted)
    }
}

impl fmt::Display for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Submission::Unsubmitted => f.write_str("New"),
            Submission::Submitted(status) => status.fmt(f),
        }
    }
}

impl FromStr for Submission {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("new") {
            return Ok(Submission::Unsubmitted);
        }
        trimmed.parse::<JobStatus>().map(Submission::Submitted)
    }
}

impl Serialize for Submission {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Submission::Unsubmitted => serializer.serialize_none(),
            Submission::Submitted(status) => serializer.serialize_some(status),
        }
    }
}

impl<'de> Deserialize<'de> for Submission {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(Submission::Unsubmitted),
            Some(value) => value
                .parse::<JobStatus>()
                .map(Submission::Submitted)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_status_names_case_insensitively() {
        assert_eq!("applied".parse::<JobStatus>().unwrap(), JobStatus::Applied);
        assert_eq!(" Offered ".parse::<JobStatus>().unwrap(), JobStatus::Offered);
        assert!("Hired".parse::<JobStatus>().is_err());
    }

    #[test]
    fn declaration_order_matches_pipeline() {
        let mut sorted = JobStatus::ALL;
        sorted.sort();
        assert_eq!(sorted, JobStatus::ALL);
    }

    #[test]
    fn null_missing_and_empty_status_are_unsubmitted() {
        let from_null: Submission = serde_json::from_str("null").unwrap();
        let from_empty: Submission = serde_json::from_str("\"\"").unwrap();
        assert_eq!(from_null, Submission::Unsubmitted);
        assert_eq!(from_empty, Submission::Unsubmitted);
    }

    #[test]
    fn submitted_status_serializes_as_plain_name() {
        let json = serde_json::to_string(&Submission::Submitted(JobStatus::Reviewed)).unwrap();
        assert_eq!(json, "\"Reviewed\"");
        assert_eq!(serde_json::to_string(&Submission::Unsubmitted).unwrap(), "null");
    }

    #[test]
    fn unknown_status_fails_to_decode() {
        let result: Result<Submission, _> = serde_json::from_str("\"Ghosted\"");
        assert!(result.is_err());
    }

    #[test]
    fn submission_displays_new_when_unsubmitted() {
        assert_eq!(Submission::Unsubmitted.to_string(), "New");
        assert_eq!("new".parse::<Submission>().unwrap(), Submission::Unsubmitted);
        assert_eq!(
            "Rejected".parse::<Submission>().unwrap(),
            Submission::Submitted(JobStatus::Rejected)
        );
    }
}
