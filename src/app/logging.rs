use super::config::{LogFormat, LogLevel};
use crate::domain::TrackerError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// HTTP stack crates that are too chatty below warn.
const QUIET_TARGETS: &[&str] = &["hyper", "reqwest", "h2", "rustls"];

/// Filter string for `level` with the HTTP stack held at warn.
pub fn filter_directives(level: LogLevel) -> String {
    let mut filter = level.as_str().to_string();
    for target in QUIET_TARGETS {
        filter.push(',');
        filter.push_str(target);
        filter.push_str("=warn");
    }
    filter
}

/// `RUST_LOG` wins when set; otherwise the configured level applies.
pub fn build_filter(level: LogLevel) -> Result<EnvFilter, TrackerError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(filter_directives(level))
        .map_err(|e| TrackerError::Logging(format!("invalid log filter: {e}")))
}

/// Install the global subscriber. Logs go to stderr so command output on
/// stdout stays clean.
pub fn init_tracing(level: LogLevel, format: LogFormat) -> Result<(), TrackerError> {
    let filter = build_filter(level)?;

    let result = match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .with(filter)
            .try_init(),
    };

    result.map_err(|e| TrackerError::Logging(format!("failed to install subscriber: {e}")))
}
