//! Job board: the single owner of list state and the mutation
//! orchestrators that reconcile it with the server.
//!
//! Locks are never held across an await. Unrelated entities can be
//! mutated concurrently; the same action on the same entity is refused
//! while one is pending.

pub mod create;
pub mod delete;
pub mod form;
pub mod guard;
pub mod outcome;
pub mod status;

pub use delete::ConfirmationGate;
pub use form::{FormErrors, FormField, JobForm};
pub use guard::{FlightGuard, InFlight};
pub use outcome::{Action, MutationError, Outcome, SkipReason};

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::api::{JobApi, ListQuery, Page, RequestError, SortOrder};
use crate::domain::{Job, Pagination};
use crate::state::{JobCollection, LoadTicket, StatusFilter, ViewFilter};

/// Listing parameters the board sends with every page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    pub page_size: u32,
    pub sort_by: String,
    pub sort_order: SortOrder,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            sort_by: "createdAt".to_string(),
            sort_order: SortOrder::Desc,
        }
    }
}

/// Everything the presentation layer renders from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    /// Current page after the search and status filter.
    pub jobs: Vec<Job>,
    /// Number of jobs on the page before filtering.
    pub loaded: usize,
    pub pagination: Pagination,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub filter: ViewFilter,
}

pub struct JobBoard<A> {
    api: A,
    config: BoardConfig,
    collection: RwLock<JobCollection>,
    view: RwLock<ViewFilter>,
    create_in_flight: InFlight<()>,
    update_in_flight: InFlight<String>,
    delete_in_flight: InFlight<String>,
}

impl<A: JobApi> JobBoard<A> {
    pub fn new(api: A, config: BoardConfig) -> Self {
        let collection = JobCollection::new(config.page_size);
        Self {
            api,
            config,
            collection: RwLock::new(collection),
            view: RwLock::new(ViewFilter::default()),
            create_in_flight: InFlight::new(),
            update_in_flight: InFlight::new(),
            delete_in_flight: InFlight::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    fn list_query(&self, page: u32) -> ListQuery {
        ListQuery {
            page,
            limit: self.config.page_size,
            sort_by: self.config.sort_by.clone(),
            sort_order: self.config.sort_order,
        }
    }

    /// Fetch a page and make it current.
    ///
    /// On failure the previous items stay in place and the error notice is
    /// recorded. A page past the end (e.g. after the last item of the last
    /// page was deleted) falls back to the last page.
    pub async fn load(&self, page: u32) -> Result<(), RequestError> {
        let (pending, page) = {
            let mut collection = self.collection.write();
            let page = collection.target_page(page);
            let ticket = collection.begin_load();
            (PendingLoad::new(&self.collection, ticket), page)
        };
        debug!(page, "loading jobs page");

        let mut result = self.api.list_jobs(self.list_query(page)).await;
        let past_end = match &result {
            Ok(fetched) if fetched.items.is_empty() => {
                let last = Pagination::pages_for(fetched.pagination.total, fetched.pagination.limit);
                (last >= 1 && fetched.pagination.page > last).then_some(last)
            }
            _ => None,
        };
        if let Some(last) = past_end {
            debug!(requested = page, last, "page is past the end, loading last page");
            result = self.api.list_jobs(self.list_query(last)).await;
        }

        pending.finish(result)
    }

    /// Reload the current page.
    pub async fn refresh(&self) -> Result<(), RequestError> {
        let page = self.collection.read().pagination().page;
        self.load(page).await
    }

    /// Patch one job in place with the server's copy. Unknown ids are
    /// ignored.
    pub fn replace_one(&self, updated: Job) -> bool {
        self.collection.write().replace_one(updated)
    }

    /// Drop a job locally, then reload the current page so totals and page
    /// count match the server again. The two steps are not atomic.
    pub async fn remove_one(&self, id: &str) -> Result<(), RequestError> {
        let page = {
            let mut collection = self.collection.write();
            collection.remove_one(id);
            collection.pagination().page
        };
        info!(id, page, "job removed, resynchronizing page");
        self.load(page).await
    }

    pub fn job(&self, id: &str) -> Option<Job> {
        self.collection.read().get(id).cloned()
    }

    pub fn items(&self) -> Vec<Job> {
        self.collection.read().items().to_vec()
    }

    pub fn pagination(&self) -> Pagination {
        self.collection.read().pagination()
    }

    pub fn is_loading(&self) -> bool {
        self.collection.read().is_loading()
    }

    pub fn error_message(&self) -> Option<String> {
        self.collection.read().error_message().map(str::to_string)
    }

    pub fn set_search_term(&self, term: impl Into<String>) {
        self.view.write().search_term = term.into();
    }

    pub fn set_status_filter(&self, filter: StatusFilter) {
        self.view.write().status_filter = filter;
    }

    /// Filtered page, recomputed from the current items on every call.
    pub fn visible_jobs(&self) -> Vec<Job> {
        let view = self.view.read();
        let collection = self.collection.read();
        view.apply(collection.items()).into_iter().cloned().collect()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let filter = self.view.read().clone();
        let collection = self.collection.read();
        BoardSnapshot {
            jobs: filter.apply(collection.items()).into_iter().cloned().collect(),
            loaded: collection.items().len(),
            pagination: collection.pagination(),
            is_loading: collection.is_loading(),
            error_message: collection.error_message().map(str::to_string),
            filter,
        }
    }

    pub fn is_creating(&self) -> bool {
        !self.create_in_flight.is_empty()
    }

    pub fn is_updating(&self, id: &str) -> bool {
        self.update_in_flight.contains(&id.to_string())
    }

    pub fn is_deleting(&self, id: &str) -> bool {
        self.delete_in_flight.contains(&id.to_string())
    }
}

/// A load that has started. Dropping it before `finish` (the caller's
/// future was cancelled) clears the loading flag.
struct PendingLoad<'a> {
    collection: &'a RwLock<JobCollection>,
    ticket: Option<LoadTicket>,
}

impl<'a> PendingLoad<'a> {
    fn new(collection: &'a RwLock<JobCollection>, ticket: LoadTicket) -> Self {
        Self {
            collection,
            ticket: Some(ticket),
        }
    }

    fn finish(mut self, result: Result<Page<Job>, RequestError>) -> Result<(), RequestError> {
        match self.ticket.take() {
            Some(ticket) => self.collection.write().finish_load(ticket, result),
            None => result.map(|_| ()),
        }
    }
}

impl Drop for PendingLoad<'_> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            self.collection.write().abandon_load(ticket);
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{TimeZone, Utc};

    use crate::api::{ListQuery, Page};
    use crate::domain::{Job, Pagination, Submission};

    pub fn job(id: &str, role: &str, status: Submission) -> Job {
        let at = Utc.with_ymd_and_hms(2025, 5, 4, 8, 0, 0).unwrap();
        Job {
            id: id.to_string(),
            role: role.to_string(),
            company: "Acme".to_string(),
            status,
            location: None,
            salary: None,
            description: None,
            applied_date: None,
            history: Vec::new(),
            created_at: at,
            updated_at: at,
        }
    }

    /// Page `query.page` of a server holding `ids`.
    pub fn page_of(ids: &[&str], query: &ListQuery) -> Page<Job> {
        let limit = query.limit.max(1) as usize;
        let start = (query.page.max(1) as usize - 1) * limit;
        let items = ids
            .iter()
            .skip(start)
            .take(limit)
            .map(|id| job(id, "Engineer", Submission::Unsubmitted))
            .collect();
        Page {
            items,
            pagination: Pagination {
                page: query.page,
                limit: query.limit,
                total: ids.len() as u64,
                pages: Pagination::pages_for(ids.len() as u64, query.limit),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{job, page_of};
    use super::*;
    use crate::api::MockJobApi;
    use crate::domain::{JobStatus, Submission};
    use crate::state::FETCH_FAILURE_NOTICE;

    fn board(api: MockJobApi) -> JobBoard<MockJobApi> {
        JobBoard::new(api, BoardConfig::default())
    }

    #[tokio::test]
    async fn load_replaces_page_and_pagination() {
        let mut api = MockJobApi::new();
        api.expect_list_jobs()
            .times(1)
            .returning(|query| {
                assert_eq!(query.sort_by, "createdAt");
                assert_eq!(query.limit, 10);
                Ok(page_of(&["a", "b", "c"], &query))
            });
        let board = board(api);

        board.load(1).await.unwrap();

        assert_eq!(board.items().len(), 3);
        assert_eq!(board.pagination().total, 3);
        assert!(!board.is_loading());
        assert!(board.error_message().is_none());
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_items() {
        let mut api = MockJobApi::new();
        let mut calls = 0;
        api.expect_list_jobs().times(2).returning(move |query| {
            calls += 1;
            if calls == 1 {
                Ok(page_of(&["a", "b"], &query))
            } else {
                Err(RequestError::Status {
                    status: 503,
                    message: "unavailable".into(),
                })
            }
        });
        let board = board(api);

        board.load(1).await.unwrap();
        assert!(board.refresh().await.is_err());

        assert_eq!(board.items().len(), 2);
        assert_eq!(board.error_message().as_deref(), Some(FETCH_FAILURE_NOTICE));
    }

    #[tokio::test]
    async fn page_past_the_end_is_clamped() {
        let ids: Vec<String> = (0..25).map(|i| format!("job-{i}")).collect();
        let mut api = MockJobApi::new();
        api.expect_list_jobs().returning(move |query| {
            let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
            Ok(page_of(&refs, &query))
        });
        let board = board(api);

        board.load(4).await.unwrap();

        let pagination = board.pagination();
        assert_eq!(pagination.pages, 3);
        assert_eq!(pagination.page, 3);
        assert_eq!(board.items().len(), 5);

        board.load(4).await.unwrap();
        assert_eq!(board.pagination().page, 3);
    }

    #[tokio::test]
    async fn remove_one_resyncs_totals() {
        let mut api = MockJobApi::new();
        let mut calls = 0;
        api.expect_list_jobs().times(2).returning(move |query| {
            calls += 1;
            if calls == 1 {
                Ok(page_of(&["a", "b", "c"], &query))
            } else {
                Ok(page_of(&["a", "c"], &query))
            }
        });
        let board = board(api);
        board.load(1).await.unwrap();

        board.remove_one("b").await.unwrap();

        assert!(board.job("b").is_none());
        assert_eq!(board.pagination().total, 2);
    }

    #[tokio::test]
    async fn removing_last_item_of_last_page_moves_back_a_page() {
        let mut api = MockJobApi::new();
        let mut calls = 0;
        api.expect_list_jobs().returning(move |query| {
            calls += 1;
            let remaining = if calls == 1 { 11 } else { 10 };
            let all: Vec<String> = (0..remaining).map(|i| format!("j{i}")).collect();
            let refs: Vec<&str> = all.iter().map(String::as_str).collect();
            Ok(page_of(&refs, &query))
        });
        let board = board(api);
        board.load(2).await.unwrap();
        assert_eq!(board.items().len(), 1);

        board.remove_one("j10").await.unwrap();

        assert_eq!(board.pagination().page, 1);
        assert_eq!(board.pagination().pages, 1);
        assert_eq!(board.items().len(), 10);
    }

    #[tokio::test]
    async fn snapshot_projects_filter() {
        let mut api = MockJobApi::new();
        api.expect_list_jobs().returning(|query| {
            let mut page = page_of(&[], &query);
            page.items = vec![
                job("1", "Engineer", Submission::Submitted(JobStatus::Applied)),
                job("2", "Designer", Submission::Unsubmitted),
            ];
            page.pagination = Pagination::new(1, 10, 2);
            Ok(page)
        });
        let board = board(api);
        board.load(1).await.unwrap();

        board.set_search_term("eng");
        let snapshot = board.snapshot();
        assert_eq!(snapshot.loaded, 2);
        assert_eq!(snapshot.jobs.len(), 1);
        assert_eq!(snapshot.jobs[0].id, "1");

        board.set_search_term("");
        board.set_status_filter(StatusFilter::Only(JobStatus::Applied));
        assert_eq!(board.visible_jobs().len(), 1);
        assert_eq!(board.items().len(), 2);
    }
}
