use tracing::{debug, error, info};

use super::form::JobForm;
use super::outcome::{Action, MutationError, Outcome, SkipReason};
use super::JobBoard;
use crate::api::JobApi;
use crate::domain::Job;

impl<A: JobApi> JobBoard<A> {
    /// Validate and submit the create form.
    ///
    /// Invalid input returns the per-field messages without any request.
    /// On success the form is cleared and page 1 is reloaded, since new jobs
    /// always surface there. On failure the form keeps its contents.
    pub async fn create(&self, form: &mut JobForm) -> Result<Outcome<Job>, MutationError> {
        let errors = form.validate();
        if !errors.is_empty() {
            debug!(errors = %errors, "create form rejected locally");
            return Err(MutationError::Validation(errors));
        }

        let Some(_guard) = self.create_in_flight.try_acquire(()) else {
            debug!("create already in flight");
            return Ok(Outcome::Skipped(SkipReason::InFlight));
        };

        match self.api.create_job(form.to_new_job()).await {
            Ok(job) => {
                info!(id = %job.id, role = %job.role, company = %job.company, "job created");
                form.clear();
                if let Err(err) = self.load(1).await {
                    debug!(error = %err, "reload after create failed");
                }
                Ok(Outcome::Done(job))
            }
            Err(source) => {
                error!(error = %source, "failed to create job");
                Err(MutationError::Request {
                    action: Action::Create,
                    source,
                })
            }
        }
    }
}
