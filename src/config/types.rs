//! Core configuration types for batch scraping
//!
//! This module contains the main `ScrapeConfig` struct and the proxy
//! settings that are passed through to the browser.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for a batch scrape.
///
/// Built either through [`ScrapeConfig::builder`] or loaded from a JSON
/// file via [`ScrapeConfig::from_json_file`]; both paths run the same
/// validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// URL prefix the zero-padded bar number is appended to.
    pub(crate) site_link: String,

    /// Highest bar number to fetch; the batch walks `known_bar_no..=1`
    /// descending.
    pub(crate) known_bar_no: u32,

    /// Maximum number of fetch tasks in flight at once.
    #[serde(default = "default_concurrency")]
    pub(crate) concurrency: usize,

    /// Run the browser without a visible window.
    #[serde(default = "default_headless")]
    pub(crate) headless: bool,

    /// Directory the timestamped CSV output file is created in.
    #[serde(default = "default_output_dir")]
    pub(crate) output_dir: PathBuf,

    /// How long to poll for a marker selector before a fetch counts as
    /// failed. Navigation itself carries no deadline.
    #[serde(default = "default_selector_wait_secs")]
    pub(crate) selector_wait_secs: u64,

    /// Optional SOCKS proxy, passed through to the browser launch and not
    /// consumed anywhere else.
    #[serde(default)]
    pub(crate) proxy: Option<ProxyConfig>,
}

pub(crate) fn default_concurrency() -> usize {
    10
}

pub(crate) fn default_headless() -> bool {
    true
}

pub(crate) fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

pub(crate) fn default_selector_wait_secs() -> u64 {
    30
}

/// SOCKS proxy settings forwarded to the browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl ProxyConfig {
    /// Render the `--proxy-server` value. Chromium ignores credentials
    /// embedded in a SOCKS URL; they are kept here as pass-through only.
    #[must_use]
    pub fn server_url(&self) -> String {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => {
                format!("socks5://{user}:{pass}@{}:{}", self.host, self.port)
            }
            _ => format!("socks5://{}:{}", self.host, self.port),
        }
    }
}
