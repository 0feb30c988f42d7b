//! Command-line and environment configuration.

use crate::error::{CliError, CliResult};
use clap::Parser;
use std::time::Duration;

pub const DEFAULT_AGENT_URL: &str = "http://localhost:10000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Interactive client that drives a remote A2A agent through multi-turn tasks.
#[derive(Debug, Clone, Parser)]
#[command(name = "a2a-cli", version, about)]
pub struct CliConfig {
    /// Base URL of the remote agent; the agent card is fetched from its well-known path.
    #[arg(long, env = "A2A_AGENT_URL", default_value = DEFAULT_AGENT_URL)]
    pub agent: String,

    /// HTTP timeout in seconds for every call to the agent.
    #[arg(long, env = "A2A_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Use request/response calls even when the agent advertises streaming.
    #[arg(long, env = "A2A_NO_STREAMING")]
    pub no_streaming: bool,

    /// Number of history messages to request when fetching a task.
    #[arg(long, env = "A2A_HISTORY_LENGTH")]
    pub history_length: Option<i32>,

    /// Log filter used when RUST_LOG is not set (e.g. "info", "a2a_cli=debug").
    #[arg(long, env = "A2A_LOG", default_value = DEFAULT_LOG_FILTER)]
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            agent: DEFAULT_AGENT_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            no_streaming: false,
            history_length: None,
            log_level: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl CliConfig {
    /// Checks values clap cannot check on its own.
    pub fn validate(&self) -> CliResult<()> {
        let agent = self.agent.trim();
        if !(agent.starts_with("http://") || agent.starts_with("https://")) {
            return Err(CliError::invalid_configuration(
                "agent",
                format!("'{}' is not an http(s) URL", self.agent),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(CliError::invalid_configuration(
                "timeout_secs",
                "must be greater than zero",
            ));
        }
        if matches!(self.history_length, Some(n) if n < 0) {
            return Err(CliError::invalid_configuration(
                "history_length",
                "must not be negative",
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Builds the HTTP client shared by every call to the agent.
    pub fn http_client(&self) -> CliResult<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout())
            .build()
            .map_err(|e| CliError::invalid_configuration("http_client", e.to_string()))
    }
}
