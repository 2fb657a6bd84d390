//! Logging setup.
//!
//! Initialization is guarded by `OnceLock` so repeated calls (tests, re-applied
//! configuration) keep the first subscriber.
use crate::{Error, LogConfiguration, Result};
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static LOG_INIT: OnceLock<()> = OnceLock::new();

/// Build the filter: `RUST_LOG` (or `info`) plus one directive per configured target.
pub fn env_filter(config: &LogConfiguration) -> Result<EnvFilter> {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    for directive in config.directives() {
        let parsed: Directive = directive.parse().map_err(|err| Error::LogDirective {
            directive: directive.clone(),
            reason: format!("{err}"),
        })?;
        filter = filter.add_directive(parsed);
    }
    Ok(filter)
}

pub fn init_logging(config: &LogConfiguration) -> Result<()> {
    let filter = env_filter(config)?;
    LOG_INIT.get_or_init(|| {
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init();
    });
    Ok(())
}
