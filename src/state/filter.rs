use std::fmt;
use std::str::FromStr;

use crate::domain::{Job, JobStatus, Submission, UnknownStatus};

/// Status selector of the list view. `All` is the "all" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(JobStatus),
}

impl StatusFilter {
    pub fn matches(self, status: Submission) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => status == Submission::Submitted(wanted),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => status.fmt(f),
        }
    }
}

/// Search term and status selector currently applied to the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    pub search_term: String,
    pub status_filter: StatusFilter,
}

impl ViewFilter {
    pub fn apply<'a>(&self, items: &'a [Job]) -> Vec<&'a Job> {
        project(items, &self.search_term, self.status_filter)
    }
}

/// Jobs from `items` that pass both the status selector and the
/// case-insensitive search over role, company and location. Order is
/// preserved and nothing is mutated.
pub fn project<'a>(items: &'a [Job], search_term: &str, status_filter: StatusFilter) -> Vec<&'a Job> {
    let needle = search_term.to_lowercase();
    items
        .iter()
        .filter(|job| status_filter.matches(job.status))
        .filter(|job| needle.is_empty() || matches_text(job, &needle))
        .collect()
}

fn matches_text(job: &Job, needle: &str) -> bool {
    job.role.to_lowercase().contains(needle)
        || job.company.to_lowercase().contains(needle)
        || job
            .location
            .as_deref()
            .is_some_and(|location| location.to_lowercase().contains(needle))
}
