//! Client-side state: the cached page of jobs and the filtered view over it.

pub mod collection;
pub mod filter;

pub use collection::{FETCH_FAILURE_NOTICE, JobCollection, LoadTicket};
pub use filter::{StatusFilter, ViewFilter, project};
