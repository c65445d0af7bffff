use tracing::{debug, error, info};

use super::outcome::{Action, MutationError, Outcome, SkipReason};
use super::JobBoard;
use crate::api::JobApi;
use crate::domain::{Job, JobPatch, JobStatus, Submission};

impl<A: JobApi> JobBoard<A> {
    /// Move `job` to `status`. Any status may follow any other; selecting
    /// the current one does nothing. The server's copy, including its
    /// history, replaces the local one.
    pub async fn update_status(&self, job: &Job, status: JobStatus) -> Result<Outcome<Job>, MutationError> {
        if job.status == Submission::Submitted(status) {
            debug!(id = %job.id, %status, "status unchanged");
            return Ok(Outcome::Skipped(SkipReason::Unchanged));
        }
        self.dispatch_status(Action::UpdateStatus, job, status).await
    }

    /// User-side apply: only a job that has not entered the pipeline moves
    /// to `Applied`.
    pub async fn apply(&self, job: &Job) -> Result<Outcome<Job>, MutationError> {
        if job.has_applied() {
            debug!(id = %job.id, status = %job.status, "job already in pipeline");
            return Ok(Outcome::Skipped(SkipReason::AlreadyInPipeline));
        }
        self.dispatch_status(Action::Apply, job, JobStatus::Applied).await
    }

    /// Send a partial update. Shares the per-job guard with status updates.
    pub async fn edit(&self, job: &Job, patch: JobPatch) -> Result<Outcome<Job>, MutationError> {
        if patch.is_empty() {
            return Ok(Outcome::Skipped(SkipReason::NothingToUpdate));
        }
        let Some(_guard) = self.update_in_flight.try_acquire(job.id.clone()) else {
            debug!(id = %job.id, "update already in flight");
            return Ok(Outcome::Skipped(SkipReason::InFlight));
        };

        match self.api.update_job(&job.id, patch).await {
            Ok(updated) => {
                info!(id = %updated.id, "job updated");
                self.replace_one(updated.clone());
                Ok(Outcome::Done(updated))
            }
            Err(source) => {
                error!(id = %job.id, error = %source, "failed to update job");
                Err(MutationError::Request {
                    action: Action::Edit,
                    source,
                })
            }
        }
    }

    async fn dispatch_status(
        &self,
        action: Action,
        job: &Job,
        status: JobStatus,
    ) -> Result<Outcome<Job>, MutationError> {
        let Some(_guard) = self.update_in_flight.try_acquire(job.id.clone()) else {
            debug!(id = %job.id, "status update already in flight");
            return Ok(Outcome::Skipped(SkipReason::InFlight));
        };

        match self.api.update_job_status(&job.id, status).await {
            Ok(updated) => {
                info!(id = %updated.id, status = %updated.status, "job status updated");
                self.replace_one(updated.clone());
                Ok(Outcome::Done(updated))
            }
            Err(source) => {
                error!(id = %job.id, %status, error = %source, "failed to update job status");
                Err(MutationError::Request { action, source })
            }
        }
    }
}
