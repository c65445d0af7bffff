use tracing::{debug, error, info};

use super::outcome::{Action, MutationError, Outcome, SkipReason};
use super::JobBoard;
use crate::api::JobApi;
use crate::domain::Job;

/// Yes/no step the user passes before a delete is sent.
pub trait ConfirmationGate {
    fn confirm(&self, job: &Job) -> bool;
}

impl<F> ConfirmationGate for F
where
    F: Fn(&Job) -> bool,
{
    fn confirm(&self, job: &Job) -> bool {
        self(job)
    }
}

impl<A: JobApi> JobBoard<A> {
    /// Delete `job` after `gate` approves. On success the job leaves the
    /// page and the page is reloaded; on failure it stays.
    pub async fn delete<G>(&self, job: &Job, gate: &G) -> Result<Outcome<String>, MutationError>
    where
        G: ConfirmationGate + ?Sized,
    {
        if self.is_deleting(&job.id) {
            debug!(id = %job.id, "delete already in flight");
            return Ok(Outcome::Skipped(SkipReason::InFlight));
        }
        if !gate.confirm(job) {
            debug!(id = %job.id, "delete not confirmed");
            return Ok(Outcome::Skipped(SkipReason::NotConfirmed));
        }
        let Some(_guard) = self.delete_in_flight.try_acquire(job.id.clone()) else {
            return Ok(Outcome::Skipped(SkipReason::InFlight));
        };

        match self.api.delete_job(&job.id).await {
            Ok(message) => {
                info!(id = %job.id, %message, "job deleted");
                if let Err(err) = self.remove_one(&job.id).await {
                    debug!(error = %err, "resync after delete failed");
                }
                Ok(Outcome::Done(message))
            }
            Err(source) => {
                error!(id = %job.id, error = %source, "failed to delete job");
                Err(MutationError::Request {
                    action: Action::Delete,
                    source,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{job, page_of};
    use super::super::BoardConfig;
    use super::*;
    use crate::api::{MockJobApi, RequestError};
    use crate::domain::Submission;

    async fn loaded(mut api: MockJobApi, after_delete: &'static [&'static str]) -> JobBoard<MockJobApi> {
        let mut calls = 0;
        api.expect_list_jobs().returning(move |query| {
            calls += 1;
            if calls == 1 {
                Ok(page_of(&["a", "b", "c"], &query))
            } else {
                Ok(page_of(after_delete, &query))
            }
        });
        let board = JobBoard::new(api, BoardConfig::default());
        board.load(1).await.unwrap();
        board
    }

    #[tokio::test]
    async fn declined_confirmation_makes_no_request() {
        let board = loaded(MockJobApi::new(), &["a", "b", "c"]).await;
        let target = board.job("b").unwrap();

        let outcome = board.delete(&target, &|_: &Job| false).await.unwrap();

        assert_eq!(outcome, Outcome::Skipped(SkipReason::NotConfirmed));
        assert_eq!(board.items().len(), 3);
    }

    #[tokio::test]
    async fn confirmed_delete_removes_and_resyncs() {
        let mut api = MockJobApi::new();
        api.expect_delete_job().times(1).returning(|id| {
            assert_eq!(id, "b");
            Ok("Job deleted successfully".to_string())
        });
        let board = loaded(api, &["a", "c"]).await;
        let target = board.job("b").unwrap();

        let message = board.delete(&target, &|_: &Job| true).await.unwrap().done().unwrap();

        assert_eq!(message, "Job deleted successfully");
        assert!(board.job("b").is_none());
        assert_eq!(board.pagination().total, 2);
        assert!(!board.is_deleting("b"));
    }

    #[tokio::test]
    async fn failed_delete_keeps_item() {
        let mut api = MockJobApi::new();
        api.expect_delete_job()
            .times(1)
            .returning(|_| Err(RequestError::NotFound { path: "/jobs/b".into() }));
        let board = loaded(api, &["a", "b", "c"]).await;
        let target = board.job("b").unwrap();

        let err = board.delete(&target, &|_: &Job| true).await.unwrap_err();

        assert_eq!(err.to_string(), "Failed to delete job. Please try again.");
        assert!(board.job("b").is_some());
    }

    #[tokio::test]
    async fn pending_delete_skips_without_asking() {
        let board = loaded(MockJobApi::new(), &["a", "b", "c"]).await;
        let target = job("b", "Engineer", Submission::Unsubmitted);
        let _pending = board.delete_in_flight.try_acquire("b".to_string()).unwrap();

        let outcome = board
            .delete(&target, &|_: &Job| -> bool { panic!("gate must not be asked") })
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Skipped(SkipReason::InFlight));
    }
}
