use crate::utils::error::{NavError, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable single line per event.
    #[default]
    Compact,
    /// One JSON object per event, for log collectors.
    Json,
}

/// Filter used when `RUST_LOG` is not set.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "navtree=debug,info"
    } else {
        "navtree=info"
    }
}

fn build_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

/// Installs the global subscriber. Logs go to stderr so stdout stays free
/// for command output. Fails if a subscriber is already installed.
pub fn init_logger(format: LogFormat, verbose: bool) -> Result<()> {
    let (compact, json) = match format {
        LogFormat::Compact => (
            Some(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .compact(),
            ),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .json()
                    .with_current_span(false)
                    .flatten_event(true),
            ),
        ),
    };

    tracing_subscriber::registry()
        .with(build_filter(verbose))
        .with(compact)
        .with(json)
        .try_init()
        .map_err(|e| NavError::ConfigError {
            message: format!("logger already initialised: {}", e),
        })
}
