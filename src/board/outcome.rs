use std::fmt;

use thiserror::Error;

use super::form::FormErrors;
use crate::api::RequestError;

/// User-initiated mutation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    UpdateStatus,
    Apply,
    Edit,
    Delete,
}

impl Action {
    /// Generic notice shown to the user when the request fails.
    pub fn failure_notice(self) -> &'static str {
        match self {
            Action::Create => "Failed to create job. Please try again.",
            Action::UpdateStatus => "Failed to update job status. Please try again.",
            Action::Apply => "Failed to apply for job. Please try again.",
            Action::Edit => "Failed to update job. Please try again.",
            Action::Delete => "Failed to delete job. Please try again.",
        }
    }
}

/// Why a mutation finished without contacting the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The same action is already pending for this entity.
    InFlight,
    /// Requested status equals the current one.
    Unchanged,
    /// Apply was requested for a job that already has a status.
    AlreadyInPipeline,
    /// The confirmation gate answered no.
    NotConfirmed,
    /// An edit with no fields set.
    NothingToUpdate,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::InFlight => "another request for this job is still pending",
            SkipReason::Unchanged => "job already has that status",
            SkipReason::AlreadyInPipeline => "already applied",
            SkipReason::NotConfirmed => "cancelled",
            SkipReason::NothingToUpdate => "no fields to update",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Done(T),
    Skipped(SkipReason),
}

impl<T> Outcome<T> {
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done(_))
    }

    pub fn done(self) -> Option<T> {
        match self {
            Outcome::Done(value) => Some(value),
            Outcome::Skipped(_) => None,
        }
    }
}

/// A mutation that failed. Validation never reaches the network; request
/// failures display as the action's generic notice and keep the
/// underlying error as `source` for diagnostics.
#[derive(Error, Debug)]
pub enum MutationError {
    #[error("{0}")]
    Validation(FormErrors),

    #[error("{}", .action.failure_notice())]
    Request {
        action: Action,
        #[source]
        source: RequestError,
    },
}

impl MutationError {
    pub fn form_errors(&self) -> Option<&FormErrors> {
        match self {
            MutationError::Validation(errors) => Some(errors),
            MutationError::Request { .. } => None,
        }
    }
}
