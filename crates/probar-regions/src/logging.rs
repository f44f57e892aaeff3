//! Logging setup.
//!
//! Resolution steps emit `tracing` events under the `probar_regions`
//! target. Tests and harnesses call [`init_logging`] once to see them.

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::RegionsConfig;
use crate::result::{PageError, PageResult};

/// Filter used when neither the caller nor `RUST_LOG` sets one
pub const DEFAULT_LOG_FILTER: &str = "probar_regions=warn";

/// Install a `fmt` subscriber writing to stderr.
///
/// Filter precedence: `filter`, then `RUST_LOG`, then [`DEFAULT_LOG_FILTER`].
/// Returns `Ok(false)` if a global subscriber was already installed.
pub fn init_logging(filter: Option<&str>) -> PageResult<bool> {
    Ok(log_subscriber(filter, std::io::stderr)?.try_init().is_ok())
}

/// Build the `fmt` subscriber [`init_logging`] installs, writing to `writer`
pub fn log_subscriber<W>(
    filter: Option<&str>,
    writer: W,
) -> PageResult<impl Subscriber + Send + Sync + 'static>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = match filter {
        Some(directives) => EnvFilter::try_new(directives).map_err(|e| PageError::Config {
            message: format!("invalid log filter `{directives}`: {e}"),
        })?,
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };
    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .finish())
}

/// Install logging with the filter from a config
pub fn init_logging_from(config: &RegionsConfig) -> PageResult<bool> {
    init_logging(config.log_filter.as_deref())
}
