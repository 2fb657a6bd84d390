// Shared error type, configuration and logging setup used across crates.
pub mod config;
pub mod observability;

pub use config::{Config, LogConfiguration, RendererKind};
pub use observability::{env_filter, init_logging};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),
    #[error("invalid log directive {directive}: {reason}")]
    LogDirective { directive: String, reason: String },
}
