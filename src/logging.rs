//! Tracing setup shared by both binaries

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;

/// Logging setup errors
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to open log file {path:?}: {source}")]
    File {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to install tracing subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Build the filter: `RUST_LOG` wins, then the configured level
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Install the global subscriber described by `config`.
/// Without a log file, events go to stderr so console output stays clean.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let json = config.format.eq_ignore_ascii_case("json");

    let layer = match &config.file {
        Some(file) => {
            let path = PathBuf::from(file);
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|source| LoggingError::File { path, source })?;

            let layer = fmt::layer().with_ansi(false).with_writer(Mutex::new(file));
            if json {
                layer.json().boxed()
            } else {
                layer.boxed()
            }
        }
        None if json => fmt::layer().json().with_writer(std::io::stderr).boxed(),
        None => fmt::layer().with_writer(std::io::stderr).boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(env_filter(config))
        .try_init()?;

    Ok(())
}
