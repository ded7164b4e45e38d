//! Server configuration from the environment

use std::env;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Settings read once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// `EnvFilter` directive, e.g. `calcdeck_units=debug,info`
    pub log_filter: String,
    /// Attach the call trace to every tool result
    pub trace: bool,
}

impl ServerConfig {
    /// Reads `CALCDECK_LOG` (falling back to `RUST_LOG`, then `info`) and
    /// `CALCDECK_TRACE`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_filter = lookup("CALCDECK_LOG")
            .or_else(|| lookup("RUST_LOG"))
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());

        let trace = lookup("CALCDECK_TRACE")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);

        Self { log_filter, trace }
    }

    /// Install the global subscriber. Logs go to stderr; stdout carries the
    /// protocol.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_new(&self.log_filter)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_target(true)
            .init();
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_FILTER.to_string(),
            trace: false,
        }
    }
}
