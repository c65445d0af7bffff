#![deny(rust_2024_compatibility)]
// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
// Noisy pedantic lints suppressed with justification:
#![allow(
    clippy::cast_lossless,            // Infallible casts are clear enough with `as`
    clippy::cast_possible_truncation, // Page numbers and counts stay small
    clippy::cast_sign_loss,           // Safe where values are known non-negative
    clippy::missing_errors_doc,       // Internal API
    clippy::missing_panics_doc,       // Internal API
    clippy::module_name_repetitions,  // e.g. JobApi in api module
    clippy::must_use_candidate,       // Annotated selectively on critical APIs
    clippy::doc_markdown              // Internal API
)]

pub mod api;
pub mod app;
pub mod board;
pub mod domain;
pub mod state;

// Re-export main types for easy access
pub use api::{ApiClient, ClientConfig, JobApi, RequestError};
pub use app::Config;
pub use board::{JobBoard, JobForm, MutationError, Outcome};
pub use domain::{Job, JobStatus, Role, Submission, TrackerError};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
