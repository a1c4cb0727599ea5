//! Tracing subscriber bootstrap for host binaries.

use tracing_subscriber::{EnvFilter, fmt};

use crate::settings::LogFormat;

/// Failure to install the global subscriber.
#[derive(Debug, thiserror::Error)]
#[error("tracing init failed: {message}")]
pub struct TelemetryError {
    message: String,
}

/// Install a `fmt` subscriber filtered by `RUST_LOG`.
///
/// Returns an error rather than panicking when a global subscriber is
/// already set, so hosts can log and carry on.
///
/// # Examples
///
/// ```rust
/// use rideshare::settings::LogFormat;
/// use rideshare::telemetry::init_tracing;
///
/// if let Err(error) = init_tracing(LogFormat::Pretty) {
///     eprintln!("{error}");
/// }
/// ```
pub fn init_tracing(format: LogFormat) -> Result<(), TelemetryError> {
    let builder = fmt().with_env_filter(EnvFilter::from_default_env());
    let installed = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
    installed.map_err(|err| TelemetryError {
        message: err.to_string(),
    })
}
