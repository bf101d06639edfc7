//! Logging setup
//!
//! Human-readable lines with timestamp and level on stderr by default, or
//! JSON lines for log collectors. `RUST_LOG` overrides the default filter.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, Default)]
pub struct TelemetryOptions {
    /// Debug output, including per-request timings
    pub verbose: bool,
    /// Emit JSON lines instead of text
    pub json: bool,
}

const VERBOSE_FILTER: &str = "debug,hyper=info,hyper_util=info,reqwest=info,h2=info,rustls=info";
const DEFAULT_FILTER: &str = "info,hyper=warn,hyper_util=warn,reqwest=warn,h2=warn,rustls=warn";

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER })
    })
}

/// Install the global subscriber. Does nothing if one is already set.
pub fn init(options: TelemetryOptions) {
    let registry = tracing_subscriber::registry().with(env_filter(options.verbose));

    if options.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .ok();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .ok();
    }

    tracing::debug!(verbose = options.verbose, json = options.json, "Logging initialized");
}
