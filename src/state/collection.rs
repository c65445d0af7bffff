use std::collections::HashSet;
use tracing::{debug, warn};

use crate::api::{Page, RequestError};
use crate::domain::{Job, Pagination};

/// Shown when a page cannot be fetched. Prior items stay visible.
pub const FETCH_FAILURE_NOTICE: &str = "Failed to fetch jobs. Please check your connection.";

/// Identifies one `load` so that a response arriving after a newer load
/// started can be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Client-side cache of the current page of jobs.
///
/// Invariants: `items` never holds two jobs with the same id, and
/// `replace_one` never reorders, inserts or removes.
#[derive(Debug, Clone)]
pub struct JobCollection {
    items: Vec<Job>,
    pagination: Pagination,
    is_loading: bool,
    error_message: Option<String>,
    has_loaded: bool,
    latest_ticket: u64,
}

impl JobCollection {
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination {
                limit: page_size.max(1),
                ..Pagination::default()
            },
            is_loading: false,
            error_message: None,
            has_loaded: false,
            latest_ticket: 0,
        }
    }

    pub fn items(&self) -> &[Job] {
        &self.items
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Whether any page has been fetched successfully yet.
    pub fn has_loaded(&self) -> bool {
        self.has_loaded
    }

    pub fn get(&self, id: &str) -> Option<&Job> {
        self.items.iter().find(|job| job.id == id)
    }

    /// Page number a load should request. Until the first page arrives the
    /// page count is unknown, so only the lower bound applies.
    pub fn target_page(&self, requested: u32) -> u32 {
        if self.has_loaded {
            self.pagination.clamp_page(requested)
        } else {
            requested.max(1)
        }
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        self.is_loading = true;
        LoadTicket(self.latest_ticket)
    }

    /// Clear the loading flag for a load whose future was dropped before it
    /// finished. A newer load keeps its own flag.
    pub fn abandon_load(&mut self, ticket: LoadTicket) {
        if ticket.0 == self.latest_ticket {
            debug!(ticket = ticket.0, "page load abandoned");
            self.is_loading = false;
        }
    }

    /// Apply the outcome of a load. On failure the previous items are kept
    /// and only `error_message` changes.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Page<Job>, RequestError>,
    ) -> Result<(), RequestError> {
        if ticket.0 != self.latest_ticket {
            debug!(ticket = ticket.0, latest = self.latest_ticket, "discarding stale page response");
            return result.map(|_| ());
        }

        self.is_loading = false;
        match result {
            Ok(page) => {
                self.replace_page(page);
                self.error_message = None;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch jobs");
                self.error_message = Some(FETCH_FAILURE_NOTICE.to_string());
                Err(err)
            }
        }
    }

    /// Replace the whole page. Duplicate ids keep their first occurrence.
    pub fn replace_page(&mut self, page: Page<Job>) {
        let mut seen = HashSet::with_capacity(page.items.len());
        let incoming = page.items.len();
        self.items = page
            .items
            .into_iter()
            .filter(|job| seen.insert(job.id.clone()))
            .collect();
        if self.items.len() != incoming {
            warn!(
                dropped = incoming - self.items.len(),
                "page contained duplicate job ids"
            );
        }
        self.pagination = page.pagination.normalized();
        self.has_loaded = true;
    }

    /// Replace the job with the same id in place. Returns `false` and leaves
    /// the collection untouched when the id is not on this page.
    pub fn replace_one(&mut self, updated: Job) -> bool {
        match self.items.iter_mut().find(|job| job.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => {
                debug!(id = %updated.id, "updated job is not on the current page");
                false
            }
        }
    }

    /// Drop the job locally. Pagination totals are left for the caller's
    /// resync to correct.
    pub fn remove_one(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|job| job.id != id);
        before != self.items.len()
    }
}
