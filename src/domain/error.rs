use thiserror::Error;

use crate::api::RequestError;
use crate::app::config::ConfigError;
use crate::board::MutationError;

/// Top-level error type for the tracker.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    #[error("{0}")]
    Mutation(#[from] MutationError),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("{0}")]
    View(String),
}
