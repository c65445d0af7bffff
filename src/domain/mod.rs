//! Domain layer for job-tracker.
//!
//! Contains the types shared across all modules:
//! - `Job`: a tracked application record with its status history
//! - `JobStatus` / `Submission`: pipeline stage, with "not yet submitted" explicit
//! - `Pagination`: the page window over the server collection
//! - `Role`: user or admin view
//! - `TrackerError`: top-level error type

pub mod error;
pub mod job;
pub mod pagination;
pub mod role;
pub mod status;

pub use error::TrackerError;
pub use job::{Job, JobPatch, NewJob, StatusHistoryEntry};
pub use pagination::Pagination;
pub use role::Role;
pub use status::{JobStatus, Submission, UnknownStatus};
