use thiserror::Error;

/// Failure of a single API call. Every failed call yields exactly one of
/// these; none of them is retried.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Request timeout: {method} {path}")]
    Timeout { method: String, path: String },
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Not found: {path}")]
    NotFound { path: String },
    #[error("HTTP error: {status} - {message}")]
    Status { status: u16, message: String },
    #[error("Request rejected: {message}")]
    Rejected { message: String },
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl RequestError {
    pub fn is_timeout(&self) -> bool {
        match self {
            RequestError::Timeout { .. } => true,
            RequestError::Network(err) => err.is_timeout(),
            _ => false,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            RequestError::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}
