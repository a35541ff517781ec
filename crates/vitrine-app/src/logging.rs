//! Logging configuration and initialization.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};

/// Event formatter used by the subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Json,
    /// Multi-line, human oriented
    Pretty,
    /// Single line per event
    Full,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// `RUST_LOG` takes precedence over the configured level. Logs go to
    /// stderr so command output on stdout stays parseable. Calling this twice
    /// is harmless: the second subscriber is simply not installed.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        let result = match self.output() {
            LogOutput::Json => fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
            LogOutput::Pretty => fmt()
                .pretty()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
            LogOutput::Full => fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
        };

        if let Err(e) = result {
            tracing::debug!(error = %e, "tracing subscriber already installed");
        }
    }

    /// Formatter selected by `format`; unknown names use the single-line one
    pub fn output(&self) -> LogOutput {
        match self.format.as_str() {
            "json" => LogOutput::Json,
            "pretty" => LogOutput::Pretty,
            _ => LogOutput::Full,
        }
    }

    /// Same config with `debug` level, for `--verbose`
    pub fn verbose(mut self) -> Self {
        self.level = "debug".into();
        self
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "pretty".into(),
        }
    }
}
