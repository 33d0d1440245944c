//! Logging utilities
//!
//! Provides logging configuration and helpers. Logs go to stderr so stdout
//! carries only formatted results.

use tracing::{Level, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Log level configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
        }
    }

    /// Pick a level from the global CLI flags; verbose wins over quiet
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (true, _) => LogLevel::Debug,
            (false, true) => LogLevel::Warn,
            (false, false) => LogLevel::Info,
        }
    }

    /// Directive used when RUST_LOG is unset
    fn directive(self) -> String {
        format!("notify_probe={}", self.to_tracing_level())
    }
}

/// Build a compact subscriber writing to `writer`; RUST_LOG takes precedence over `level`
fn build_subscriber<W>(level: LogLevel, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false)
        .compact()
        .finish()
}

/// Initialize the global logger on stderr
pub fn init_logger(level: LogLevel) {
    build_subscriber(level, std::io::stderr).init();
}
