use super::config::Config;
use super::error::{Error, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Where log output goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Append to the configured log file. The terminal UI owns stdout/stderr.
    File,
    /// Write to stderr, for one-shot commands.
    Stderr,
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the default filter when set.
pub fn init_logging(config: &Config, target: LogTarget) -> Result<()> {
    let default_directive = match target {
        LogTarget::File => "vibenav=info",
        LogTarget::Stderr => "vibenav=warn",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let installed = match target {
        LogTarget::File => {
            config.init()?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&config.log_path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };

    installed.map_err(|e| Error::Logging(format!("Failed to install log subscriber: {}", e)))
}
