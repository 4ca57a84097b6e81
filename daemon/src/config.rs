//! Exporter configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

use govwatch_types::ChainTarget;

use crate::error::DaemonError;

/// Configuration for the govwatch daemon.
///
/// Can be loaded from a TOML file via [`ExporterConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Every scalar has a default;
/// only the chain list is required, and [`validate`](ExporterConfig::validate)
/// rejects a configuration without one before the poll loop starts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// Seconds between poll cycles.
    #[serde(default = "default_scrape_interval_secs")]
    pub scrape_interval_secs: u64,

    /// How many of the most recent proposals each cycle requests.
    #[serde(default = "default_proposals_page_size")]
    pub proposals_page_size: u32,

    /// Voter-list page size for voter-list mode membership checks.
    #[serde(default = "default_voters_page_size")]
    pub voters_page_size: u32,

    /// Per-request HTTP timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Maximum retries after a rate-limited vote lookup.
    #[serde(default = "default_vote_max_retries")]
    pub vote_max_retries: u32,

    /// Fixed wait between rate-limit retries, in seconds.
    #[serde(default = "default_vote_retry_wait_secs")]
    pub vote_retry_wait_secs: u64,

    /// Listen address for the metrics HTTP server.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Chain/address pairs to watch.
    #[serde(default)]
    pub chains: Vec<ChainTarget>,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_scrape_interval_secs() -> u64 {
    60
}

fn default_proposals_page_size() -> u32 {
    50
}

fn default_voters_page_size() -> u32 {
    200
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_vote_max_retries() -> u32 {
    5
}

fn default_vote_retry_wait_secs() -> u64 {
    1
}

fn default_listen_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ExporterConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, DaemonError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DaemonError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, DaemonError> {
        toml::from_str(s).map_err(|e| DaemonError::Config(e.to_string()))
    }

    /// Reject configurations the poll loop cannot run with.
    ///
    /// Called once at startup; the core assumes a validated configuration
    /// and does not re-validate per cycle.
    pub fn validate(&self) -> Result<(), DaemonError> {
        if self.chains.is_empty() {
            return Err(DaemonError::Config("no chains configured".into()));
        }
        for (index, chain) in self.chains.iter().enumerate() {
            if chain.name.is_empty() {
                return Err(DaemonError::Config(format!("chain #{index}: name is empty")));
            }
            if chain.node_url.is_empty() {
                return Err(DaemonError::Config(format!(
                    "chain {}: node_url is empty",
                    chain.name
                )));
            }
            if chain.address.is_empty() {
                return Err(DaemonError::Config(format!(
                    "chain {}: address is empty",
                    chain.name
                )));
            }
        }
        if self.scrape_interval_secs == 0 {
            return Err(DaemonError::Config("scrape_interval_secs must be >= 1".into()));
        }
        self.listen_socket_addr()?;
        Ok(())
    }

    /// The parsed listen address for the metrics server.
    pub fn listen_socket_addr(&self) -> Result<SocketAddr, DaemonError> {
        self.listen_addr.parse().map_err(|e| {
            DaemonError::Config(format!("invalid listen_addr {}: {e}", self.listen_addr))
        })
    }
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            scrape_interval_secs: default_scrape_interval_secs(),
            proposals_page_size: default_proposals_page_size(),
            voters_page_size: default_voters_page_size(),
            request_timeout_secs: default_request_timeout_secs(),
            vote_max_retries: default_vote_max_retries(),
            vote_retry_wait_secs: default_vote_retry_wait_secs(),
            listen_addr: default_listen_addr(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            chains: Vec::new(),
        }
    }
}
